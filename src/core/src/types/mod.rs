//! Shared types for the platform demo

pub mod id;
pub mod permission;
pub mod platform;

// Re-export commonly used types
pub use id::PlatformId;
pub use permission::{Action, Permission, Resource, ResourceKind};
pub use platform::{
    Authorization, AuthorizationStatus, Bucket, NewAuthorization, NewBucket, NewTask,
    Organization, RetentionRule, Task, User,
};
