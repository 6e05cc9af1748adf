//! Event sink system for operation observability.
//!
//! Operations describe what they do as [`OperationEvent`]s and hand them to
//! an [`EventSink`]. The server logs them through `tracing`; tests collect
//! them to check ordering.

mod event;
mod sink;

pub use event::{EventKind, EventLevel, OperationEvent};
pub use sink::{CollectingEventSink, EventSink, LoggingEventSink};
