//! Outcome status enum.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The terminal status of an operation invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// The operation completed and produced a payload.
    Ok,
    /// The cancellation signal fired before completion.
    Cancelled,
    /// The operation failed for any other reason.
    Failed,
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::Failed => write!(f, "failed"),
        }
    }
}
