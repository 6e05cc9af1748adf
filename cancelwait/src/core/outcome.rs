//! Tagged result of a single operation invocation.

use super::OutcomeStatus;
use crate::errors::OperationError;

/// The outcome of invoking a cancellable operation.
///
/// Produced exactly once per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The operation completed.
    Success(T),
    /// The cancellation signal fired first.
    Cancelled {
        /// Why the signal was triggered.
        reason: String,
    },
    /// The operation failed for another reason.
    Failure(String),
}

impl<T> Outcome<T> {
    /// Folds an operation result into an outcome.
    pub fn from_result(result: Result<T, OperationError>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(OperationError::Cancelled { reason }) => Self::Cancelled { reason },
            Err(OperationError::Unhandled(cause)) => Self::Failure(cause),
        }
    }

    /// Returns the status tag.
    #[must_use]
    pub fn status(&self) -> OutcomeStatus {
        match self {
            Self::Success(_) => OutcomeStatus::Ok,
            Self::Cancelled { .. } => OutcomeStatus::Cancelled,
            Self::Failure(_) => OutcomeStatus::Failed,
        }
    }

    /// Returns true if the outcome is a cancellation.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }

    /// Returns the payload, if the operation succeeded.
    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    /// Converts back into a result, re-raising cancellation as an error.
    pub fn into_result(self) -> Result<T, OperationError> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Cancelled { reason } => Err(OperationError::Cancelled { reason }),
            Self::Failure(cause) => Err(OperationError::Unhandled(cause)),
        }
    }
}

impl<T> From<Result<T, OperationError>> for Outcome<T> {
    fn from(result: Result<T, OperationError>) -> Self {
        Self::from_result(result)
    }
}
