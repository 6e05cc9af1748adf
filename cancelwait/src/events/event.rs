//! Events emitted by cancellable operations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// What happened during an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// The operation began.
    Started,
    /// The delay elapsed without cancellation.
    Waited,
    /// The cancellation signal won the race.
    Cancelled,
}

impl EventKind {
    /// Returns the dotted event type used in structured logs.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Started => "operation.started",
            Self::Waited => "operation.waited",
            Self::Cancelled => "operation.cancelled",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.event_type())
    }
}

/// Severity an event is logged at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventLevel {
    /// Informational.
    Info,
    /// Error.
    Error,
}

/// A single event emitted by an operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationEvent {
    /// The kind of event.
    pub kind: EventKind,
    /// Severity.
    pub level: EventLevel,
    /// Human-readable message.
    pub message: String,
    /// Optional structured data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl OperationEvent {
    /// The operation is starting.
    #[must_use]
    pub fn started() -> Self {
        Self {
            kind: EventKind::Started,
            level: EventLevel::Info,
            message: "Starting request...".to_string(),
            data: None,
        }
    }

    /// The operation waited out its full delay.
    #[must_use]
    pub fn waited(delay: Duration) -> Self {
        Self {
            kind: EventKind::Waited,
            level: EventLevel::Info,
            message: format!("Waited {} seconds", delay.as_secs_f64()),
            data: Some(serde_json::json!({
                "delay_ms": u64::try_from(delay.as_millis()).unwrap_or(u64::MAX)
            })),
        }
    }

    /// The operation was cancelled before its delay elapsed.
    #[must_use]
    pub fn cancelled(reason: &str) -> Self {
        Self {
            kind: EventKind::Cancelled,
            level: EventLevel::Error,
            message: "Ooops! The operation was cancelled.".to_string(),
            data: Some(serde_json::json!({ "reason": reason })),
        }
    }
}
