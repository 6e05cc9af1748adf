//! Route table and handlers.

use super::{ApiError, AppState, RequestCancellation};
use crate::core::Outcome;
use crate::forecast::WeatherForecast;
use crate::observability::SpanTimer;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info_span, Instrument};

/// Path of the forecast route.
pub const FORECAST_PATH: &str = "/weatherforecast";
/// Path of the cancellable operation route.
pub const ENDPOINT_PATH: &str = "/endpoint";
/// Path of the development-only API description.
pub const API_DESCRIPTION_PATH: &str = "/openapi.json";

/// A named, documented route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteInfo {
    /// URL path.
    pub path: &'static str,
    /// Stable operation name.
    pub name: &'static str,
    /// One-line description.
    pub summary: &'static str,
    /// Content type of a successful response.
    pub content_type: &'static str,
}

/// The public routes, in registration order.
pub const ROUTES: [RouteInfo; 2] = [
    RouteInfo {
        path: FORECAST_PATH,
        name: "GetWeatherForecast",
        summary: "Returns randomly generated forecasts for the coming days",
        content_type: "application/json",
    },
    RouteInfo {
        path: ENDPOINT_PATH,
        name: "GetEndpoint",
        summary: "Waits, then greets; abandons the wait when the request is cancelled",
        content_type: "text/plain",
    },
];

/// `GET /weatherforecast`
pub async fn get_weather_forecast(State(state): State<AppState>) -> Json<Vec<WeatherForecast>> {
    Json(state.forecasts.forecasts())
}

/// `GET /endpoint`
///
/// The operation runs on its own task so that it keeps running, and can log
/// its cancellation, after this handler future has been dropped.
pub async fn get_endpoint(
    State(state): State<AppState>,
    mut cancellation: RequestCancellation,
) -> Result<&'static str, ApiError> {
    let timer = SpanTimer::start("endpoint");
    let operation = Arc::clone(&state.operation);
    let token = cancellation.token();
    let span = info_span!(
        "operation",
        name = operation.name(),
        request_id = %cancellation.request_id()
    );

    let joined = tokio::spawn(async move { operation.invoke(&token).await }.instrument(span)).await;
    cancellation.complete();

    let outcome = joined.unwrap_or_else(|join_error| Outcome::Failure(join_error.to_string()));
    debug!(
        span_name = timer.name(),
        elapsed_ms = timer.elapsed_ms(),
        status = %outcome.status(),
        "Operation finished"
    );

    outcome.into_result().map_err(ApiError::from)
}

/// `GET /openapi.json`, registered in development only.
pub async fn get_api_description() -> Json<serde_json::Value> {
    Json(super::openapi::api_description(&ROUTES))
}
