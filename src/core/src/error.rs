//! Unified error type for the platform demo
//!
//! Every service collaborator reports failures through [`CoreError`], whether
//! the backend is the HTTP API or the in-memory platform.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for platform operations
#[derive(Debug, Error)]
pub enum CoreError {
    /// Request never produced a response (connect, TLS, timeout, body read)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Platform answered with an unexpected status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input/state
    #[error("Invalid: {0}")]
    Invalid(String),

    /// Serialization/Deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CoreError {
    /// Create a transport error
    pub fn transport<S: Into<String>>(msg: S) -> Self {
        CoreError::Transport(msg.into())
    }

    /// Create an API error from a status code and message
    pub fn api<S: Into<String>>(status: u16, msg: S) -> Self {
        CoreError::Api {
            status,
            message: msg.into(),
        }
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        CoreError::NotFound(msg.into())
    }

    /// Create an invalid error
    pub fn invalid<S: Into<String>>(msg: S) -> Self {
        CoreError::Invalid(msg.into())
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        CoreError::Configuration(msg.into())
    }

    /// Whether this error means the looked-up entity does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::NotFound(_))
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Serialization(err.to_string())
    }
}
