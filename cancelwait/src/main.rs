//! Cancelwait service binary.

use anyhow::{Context, Result};
use cancelwait::config::ServiceConfig;
use cancelwait::events::LoggingEventSink;
use cancelwait::observability::init_tracing;
use cancelwait::server;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServiceConfig::from_env().context("Failed to load configuration")?;

    init_tracing(config.log_format).context("Failed to initialize tracing")?;

    info!(
        "Starting cancelwait v{} ({})",
        env!("CARGO_PKG_VERSION"),
        config.environment
    );

    server::run(config, Arc::new(LoggingEventSink::new()))
        .await
        .context("Server error")?;

    Ok(())
}
