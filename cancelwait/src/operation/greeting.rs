//! The delayed greeting served on `/endpoint`.

use super::{cancellable_delay, CancellableOperation};
use crate::cancellation::CancellationToken;
use crate::errors::OperationError;
use crate::events::{EventSink, LoggingEventSink, OperationEvent};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Payload returned when the delay elapses.
pub const GREETING: &str = "Hello World!";

/// How long the greeting waits before answering.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(5000);

/// Waits a fixed delay, then answers with [`GREETING`].
///
/// Emits exactly two events per invocation: `started`, then either `waited`
/// or `cancelled`.
#[derive(Clone)]
pub struct DelayedGreeting {
    delay: Duration,
    sink: Arc<dyn EventSink>,
}

impl DelayedGreeting {
    /// Creates a greeting with the default delay that logs through `tracing`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            delay: DEFAULT_DELAY,
            sink: Arc::new(LoggingEventSink::new()),
        }
    }

    /// Sets the delay.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Sets the event sink.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }
}

impl Default for DelayedGreeting {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DelayedGreeting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelayedGreeting")
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CancellableOperation for DelayedGreeting {
    type Output = &'static str;

    fn name(&self) -> &str {
        "delayed_greeting"
    }

    async fn handle(&self, token: &CancellationToken) -> Result<Self::Output, OperationError> {
        self.sink.try_emit(OperationEvent::started());

        if let Err(err) = cancellable_delay(self.delay, token).await {
            if let OperationError::Cancelled { reason } = &err {
                self.sink.try_emit(OperationEvent::cancelled(reason));
            }
            return Err(err);
        }

        self.sink.try_emit(OperationEvent::waited(self.delay));
        Ok(GREETING)
    }
}
