//! Error types for authorization matching

use thiserror::Error;

/// Authorization matching errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthzError {
    /// No authorization grants every required permission
    #[error("No authorization satisfies [{required}] ({examined} examined)")]
    PermissionNotSatisfied {
        /// Rendered requirement, for operator diagnostics
        required: String,
        /// How many authorizations were scanned
        examined: usize,
    },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for authorization matching
pub type Result<T> = std::result::Result<T, AuthzError>;
