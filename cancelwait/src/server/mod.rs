//! HTTP server.
//!
//! Provides the endpoints:
//! - `GET /weatherforecast`: synthetic forecasts
//! - `GET /endpoint`: a delayed greeting that is abandoned on cancellation
//! - `GET /openapi.json`: API description (development only)

mod cancellation;
mod error;
mod openapi;
mod routes;
mod state;

pub use cancellation::{RequestCancellation, DISCONNECT_REASON};
pub use error::{client_closed_request, ApiError, CLIENT_CLOSED_REQUEST};
pub use openapi::api_description;
pub use routes::{
    get_api_description, get_endpoint, get_weather_forecast, RouteInfo, API_DESCRIPTION_PATH,
    ENDPOINT_PATH, FORECAST_PATH, ROUTES,
};
pub use state::{AppState, EndpointOperation};

use crate::cancellation::CancellationToken;
use crate::config::ServiceConfig;
use crate::errors::ServiceError;
use crate::events::EventSink;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Reason recorded on the root token when the process is asked to stop.
pub const SHUTDOWN_REASON: &str = "server shutdown";

/// Build the HTTP router.
pub fn build_router(state: AppState) -> Router {
    let mut router: Router<AppState> = Router::new()
        .route(FORECAST_PATH, get(get_weather_forecast))
        .route(ENDPOINT_PATH, get(get_endpoint));

    if state.config.environment.is_development() {
        router = router.route(API_DESCRIPTION_PATH, get(get_api_description));
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Binds the configured address and serves until SIGINT or SIGTERM.
pub async fn run(config: ServiceConfig, sink: Arc<dyn EventSink>) -> Result<(), ServiceError> {
    let listener = TcpListener::bind(config.bind_address).await?;
    let state = AppState::new(config, sink);

    tokio::spawn(cancel_on_signal(state.shutdown_token()));

    serve(listener, state).await
}

/// Serves on `listener` until `state.shutdown` is cancelled.
///
/// Cancelling the root token also cancels every in-flight request token;
/// the server then drains open connections before returning.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<(), ServiceError> {
    let shutdown = state.shutdown_token();
    let local_addr = listener.local_addr()?;

    info!(
        address = %local_addr,
        environment = %state.config.environment,
        "cancelwait listening"
    );

    shutdown.on_cancel(|reason| {
        info!(reason, "Shutdown requested, cancelling in-flight operations");
    });

    let app = build_router(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Cancels `token` with [`SHUTDOWN_REASON`] on SIGINT or SIGTERM.
pub async fn cancel_on_signal(token: Arc<CancellationToken>) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received SIGINT"),
        () = terminate => info!("Received SIGTERM"),
    }

    token.cancel(SHUTDOWN_REASON);
}
