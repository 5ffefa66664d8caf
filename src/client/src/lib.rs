//! # platdemo client
//!
//! Backends for the service traits in `platdemo_core::traits`.
//!
//! - [`HttpPlatform`]: talks to the platform's v2 HTTP API
//! - [`MemoryPlatform`]: keeps everything in process, for tests and dry runs

pub mod config;
pub mod http;
pub mod memory;

pub use config::ClientConfig;
pub use http::HttpPlatform;
pub use memory::MemoryPlatform;
