//! Event sink trait and implementations.

use super::{EventKind, EventLevel, OperationEvent};
use parking_lot::RwLock;
use tracing::{error, info};

/// Trait for sinks that receive operation events.
pub trait EventSink: Send + Sync {
    /// Emits an event without blocking.
    ///
    /// This method must never fail. Errors are logged but suppressed.
    fn try_emit(&self, event: OperationEvent);
}

/// An event sink that logs events using the tracing framework.
///
/// Each event is logged at its own [`EventLevel`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingEventSink;

impl LoggingEventSink {
    /// Creates a new logging sink.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn log_event(event: &OperationEvent) {
        let event_type = event.kind.event_type();
        match event.level {
            EventLevel::Info => {
                info!(
                    event_type = %event_type,
                    event_data = ?event.data,
                    "{}", event.message
                );
            }
            EventLevel::Error => {
                error!(
                    event_type = %event_type,
                    event_data = ?event.data,
                    "{}", event.message
                );
            }
        }
    }
}

impl EventSink for LoggingEventSink {
    fn try_emit(&self, event: OperationEvent) {
        Self::log_event(&event);
    }
}

/// A collecting event sink for tests.
#[derive(Debug, Default)]
pub struct CollectingEventSink {
    events: RwLock<Vec<OperationEvent>>,
}

impl CollectingEventSink {
    /// Creates a new collecting sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected events.
    #[must_use]
    pub fn events(&self) -> Vec<OperationEvent> {
        self.events.read().clone()
    }

    /// Returns the kinds of all collected events, in emission order.
    #[must_use]
    pub fn kinds(&self) -> Vec<EventKind> {
        self.events.read().iter().map(|e| e.kind).collect()
    }

    /// Returns the number of collected events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    /// Returns true if no events have been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    /// Returns events of one kind.
    #[must_use]
    pub fn events_of_kind(&self, kind: EventKind) -> Vec<OperationEvent> {
        self.events
            .read()
            .iter()
            .filter(|e| e.kind == kind)
            .cloned()
            .collect()
    }
}

impl EventSink for CollectingEventSink {
    fn try_emit(&self, event: OperationEvent) {
        self.events.write().push(event);
    }
}
