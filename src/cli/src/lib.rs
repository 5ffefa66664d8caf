//! platdemo command-line tool
//!
//! Provisions a user, an organization, input/output buckets and scoped
//! authorizations on a time-series platform, then exercises them: writing
//! synthetic points, querying, downsampling, and scheduling a downsampling
//! task. Every command picks the credential it presents by matching the
//! user's authorizations against the permissions the command needs.

pub mod config;
pub mod demo;
pub mod flux;
pub mod namespace;

pub use config::DemoConfig;
pub use demo::Demo;
pub use namespace::Namespace;
