//! Shared state handed to every handler.

use crate::cancellation::CancellationToken;
use crate::config::ServiceConfig;
use crate::events::EventSink;
use crate::forecast::ForecastGenerator;
use crate::operation::{CancellableOperation, DelayedGreeting};
use std::sync::Arc;

/// The operation served on `/endpoint`.
pub type EndpointOperation = dyn CancellableOperation<Output = &'static str>;

/// Server state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Configuration
    pub config: Arc<ServiceConfig>,
    /// Operation behind `/endpoint`
    pub operation: Arc<EndpointOperation>,
    /// Forecast source for `/weatherforecast`
    pub forecasts: ForecastGenerator,
    /// Root token; cancelled on server shutdown
    pub shutdown: Arc<CancellationToken>,
}

impl AppState {
    /// Creates state whose `/endpoint` operation is a [`DelayedGreeting`]
    /// reporting to `sink`.
    #[must_use]
    pub fn new(config: ServiceConfig, sink: Arc<dyn EventSink>) -> Self {
        let operation = DelayedGreeting::new()
            .with_delay(config.operation_delay())
            .with_sink(sink);

        Self {
            forecasts: ForecastGenerator::new(config.forecast_count),
            config: Arc::new(config),
            operation: Arc::new(operation),
            shutdown: Arc::new(CancellationToken::new()),
        }
    }

    /// Replaces the `/endpoint` operation.
    #[must_use]
    pub fn with_operation(mut self, operation: Arc<EndpointOperation>) -> Self {
        self.operation = operation;
        self
    }

    /// Returns the root shutdown token.
    #[must_use]
    pub fn shutdown_token(&self) -> Arc<CancellationToken> {
        Arc::clone(&self.shutdown)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("operation", &self.operation)
            .field("forecasts", &self.forecasts)
            .field("shutdown", &self.shutdown)
            .finish()
    }
}
