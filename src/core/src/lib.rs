//! # platdemo core
//!
//! Shared types, service traits, and error handling for the platform demo.
//! The matcher, the HTTP client and the CLI all depend on this crate and on
//! nothing else in the workspace.

pub mod types;
pub mod traits;
pub mod error;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use types::{
    Action, Authorization, AuthorizationStatus, Bucket, NewAuthorization, NewBucket, NewTask,
    Organization, Permission, PlatformId, Resource, ResourceKind, RetentionRule, Task, User,
};
