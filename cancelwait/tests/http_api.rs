//! Integration tests for the HTTP surface.
//!
//! These drive the router in-process with `tower::ServiceExt::oneshot` under
//! paused tokio time, so multi-second delays complete instantly and elapsed
//! times are exact.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use cancelwait::cancellation::CancellationToken;
use cancelwait::config::{Environment, ServiceConfig};
use cancelwait::errors::OperationError;
use cancelwait::events::{CollectingEventSink, EventKind};
use cancelwait::forecast::SUMMARIES;
use cancelwait::operation::CancellableOperation;
use cancelwait::server::{build_router, AppState, CLIENT_CLOSED_REQUEST, DISCONNECT_REASON};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{timeout, Instant};
use tower::ServiceExt;

// =============================================================================
// Helpers
// =============================================================================

fn test_app(config: ServiceConfig) -> (Router, AppState, Arc<CollectingEventSink>) {
    let sink = Arc::new(CollectingEventSink::new());
    let state = AppState::new(config, sink.clone());
    (build_router(state.clone()), state, sink)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// An operation whose task panics.
#[derive(Debug)]
struct PanickingOperation;

#[async_trait]
impl CancellableOperation for PanickingOperation {
    type Output = &'static str;

    fn name(&self) -> &str {
        "panicking"
    }

    async fn handle(&self, _token: &CancellationToken) -> Result<Self::Output, OperationError> {
        panic!("operation exploded");
    }
}

// =============================================================================
// /weatherforecast
// =============================================================================

#[tokio::test]
async fn weatherforecast_returns_five_forecasts() {
    let (app, _state, _sink) = test_app(ServiceConfig::default());

    let response = app.oneshot(get("/weatherforecast")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    let forecasts = body.as_array().expect("body should be an array");
    assert_eq!(forecasts.len(), 5);

    let mut previous: Option<NaiveDate> = None;
    for forecast in forecasts {
        let object = forecast.as_object().unwrap();
        let mut keys: Vec<_> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["date", "summary", "temperatureC", "temperatureF"]);

        let celsius = forecast["temperatureC"].as_i64().unwrap();
        assert!((-20..55).contains(&celsius));

        let summary = forecast["summary"].as_str().unwrap();
        assert!(SUMMARIES.contains(&summary));

        let date: NaiveDate = forecast["date"].as_str().unwrap().parse().unwrap();
        if let Some(previous) = previous {
            assert_eq!(date.signed_duration_since(previous).num_days(), 1);
        }
        previous = Some(date);
    }
}

#[tokio::test]
async fn weatherforecast_honours_configured_count() {
    let (app, _state, _sink) = test_app(ServiceConfig::default().with_forecast_count(3));

    let response = app.oneshot(get("/weatherforecast")).await.unwrap();
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();

    assert_eq!(body.as_array().unwrap().len(), 3);
}

// =============================================================================
// /endpoint
// =============================================================================

#[tokio::test(start_paused = true)]
async fn endpoint_returns_greeting_after_delay() {
    let (app, _state, sink) = test_app(ServiceConfig::default());
    let start = Instant::now();

    let response = app.oneshot(get("/endpoint")).await.unwrap();

    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(5000));
    assert!(elapsed < Duration::from_millis(5100));
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/plain"));
    assert_eq!(body_string(response).await, "Hello World!");
    assert_eq!(sink.kinds(), vec![EventKind::Started, EventKind::Waited]);
}

#[tokio::test(start_paused = true)]
async fn dropped_request_cancels_operation() {
    let (app, _state, sink) = test_app(ServiceConfig::default());
    let start = Instant::now();

    // Dropping the in-flight request future is what the HTTP runtime does
    // when the client disconnects.
    let result = timeout(Duration::from_millis(1000), app.oneshot(get("/endpoint"))).await;
    assert!(result.is_err());

    // Let the detached operation task observe the cancellation.
    tokio::time::sleep(Duration::from_millis(10)).await;

    assert!(start.elapsed() < Duration::from_millis(1100));
    assert_eq!(sink.kinds(), vec![EventKind::Started, EventKind::Cancelled]);
    assert_eq!(
        sink.events()[1].data,
        Some(serde_json::json!({ "reason": DISCONNECT_REASON }))
    );
}

#[tokio::test(start_paused = true)]
async fn shutdown_cancels_in_flight_request() {
    let (app, state, sink) = test_app(ServiceConfig::default());
    let start = Instant::now();

    let shutdown = state.shutdown_token();
    let trigger = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(1000)).await;
        shutdown.cancel("server shutdown");
    });

    let response = app.oneshot(get("/endpoint")).await.unwrap();
    trigger.await.unwrap();

    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(1000));
    assert!(elapsed < Duration::from_millis(1100));
    assert_eq!(response.status().as_u16(), CLIENT_CLOSED_REQUEST);
    assert_eq!(body_string(response).await, "");
    assert_eq!(sink.kinds(), vec![EventKind::Started, EventKind::Cancelled]);
}

#[tokio::test(start_paused = true)]
async fn request_timeout_cancels_operation() {
    let config = ServiceConfig::default().with_request_timeout(Duration::from_millis(1500));
    let (app, _state, sink) = test_app(config);
    let start = Instant::now();

    let response = app.oneshot(get("/endpoint")).await.unwrap();

    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(1500));
    assert!(elapsed < Duration::from_millis(1600));
    assert_eq!(response.status().as_u16(), CLIENT_CLOSED_REQUEST);
    assert_eq!(
        sink.events()[1].data,
        Some(serde_json::json!({ "reason": "timeout" }))
    );
}

#[tokio::test(start_paused = true)]
async fn timeout_longer_than_delay_does_not_interfere() {
    let config = ServiceConfig::default()
        .with_operation_delay(Duration::from_millis(200))
        .with_request_timeout(Duration::from_millis(1000));
    let (app, _state, sink) = test_app(config);

    let response = app.oneshot(get("/endpoint")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(sink.kinds(), vec![EventKind::Started, EventKind::Waited]);
}

#[tokio::test(start_paused = true)]
async fn concurrent_requests_are_independent() {
    let (app, _state, sink) = test_app(ServiceConfig::default());

    let abandoned = timeout(Duration::from_millis(1000), app.clone().oneshot(get("/endpoint")));
    let completed = app.oneshot(get("/endpoint"));
    let (abandoned, completed) = tokio::join!(abandoned, completed);

    assert!(abandoned.is_err());
    let completed = completed.unwrap();
    assert_eq!(completed.status(), StatusCode::OK);
    assert_eq!(body_string(completed).await, "Hello World!");

    assert_eq!(sink.events_of_kind(EventKind::Started).len(), 2);
    assert_eq!(sink.events_of_kind(EventKind::Cancelled).len(), 1);
    assert_eq!(sink.events_of_kind(EventKind::Waited).len(), 1);
}

#[tokio::test]
async fn panicking_operation_maps_to_500() {
    let sink = Arc::new(CollectingEventSink::new());
    let state = AppState::new(ServiceConfig::default(), sink).with_operation(Arc::new(PanickingOperation));
    let app = build_router(state);

    let response = app.oneshot(get("/endpoint")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// =============================================================================
// /openapi.json
// =============================================================================

#[tokio::test]
async fn api_description_hidden_in_production() {
    let (app, _state, _sink) = test_app(ServiceConfig::default());

    let response = app.oneshot(get("/openapi.json")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn api_description_served_in_development() {
    let config = ServiceConfig::default().with_environment(Environment::Development);
    let (app, _state, _sink) = test_app(config);

    let response = app.oneshot(get("/openapi.json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(
        body["paths"]["/weatherforecast"]["get"]["operationId"],
        "GetWeatherForecast"
    );
    assert_eq!(body["paths"]["/endpoint"]["get"]["operationId"], "GetEndpoint");
}
