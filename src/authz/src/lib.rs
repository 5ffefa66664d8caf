//! # platdemo authorization matching
//!
//! Selects which of a user's authorizations to present for an operation.
//!
//! ## Example
//!
//! ```rust
//! use platdemo_authz::{find_authorization, RequiredPermissions};
//! use platdemo_core::{Authorization, AuthorizationStatus, Permission, PlatformId};
//!
//! let org = PlatformId::new(1).unwrap();
//! let bucket = PlatformId::new(10).unwrap();
//!
//! let auths = vec![Authorization {
//!     id: PlatformId::new(100).unwrap(),
//!     token: "token".to_string(),
//!     status: AuthorizationStatus::Active,
//!     user_id: PlatformId::new(2).unwrap(),
//!     org_id: org,
//!     description: None,
//!     permissions: vec![Permission::write_bucket(org, bucket)],
//! }];
//!
//! let required = RequiredPermissions::new(Permission::write_bucket(org, bucket));
//! let found = find_authorization(&auths, &required).unwrap();
//! assert_eq!(found.token, "token");
//! ```

pub mod error;
pub mod matcher;

// Re-export commonly used types
pub use error::{AuthzError, Result};
pub use matcher::{find_authorization, find_authorization_with, Credential, RequiredPermissions};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
