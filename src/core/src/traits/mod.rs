//! Service traits implemented by platform backends

pub mod services;

// Re-export commonly used traits
pub use services::{
    AuthorizationService, BucketService, OrganizationService, Platform, PointWriter,
    QueryService, TaskService, UserService,
};
