//! Error types for the cancelwait service.
//!
//! Operations fail with [`OperationError`]; startup and serving fail with
//! [`ServiceError`]. Mapping onto HTTP responses lives in
//! [`crate::server::ApiError`].

use thiserror::Error;

/// Errors surfaced by a cancellable operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationError {
    /// The cancellation signal triggered before the operation completed.
    #[error("Operation cancelled: {reason}")]
    Cancelled {
        /// Why the signal was triggered.
        reason: String,
    },

    /// Any other failure. Not expected during normal operation.
    #[error("Unhandled error: {0}")]
    Unhandled(String),
}

impl OperationError {
    /// Creates a cancellation error.
    #[must_use]
    pub fn cancelled(reason: impl Into<String>) -> Self {
        Self::Cancelled {
            reason: reason.into(),
        }
    }

    /// Returns true if this error reports a cancellation.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

/// Error raised when an environment setting cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid value '{value}' for {key}: {message}")]
pub struct ConfigError {
    /// The environment variable name.
    pub key: String,
    /// The offending value.
    pub value: String,
    /// What was expected.
    pub message: String,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            message: message.into(),
        }
    }
}

/// The top-level error type for running the service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Configuration could not be loaded.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// The listener could not be bound or the server failed while serving.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
