//! Minimal OpenAPI description of the public routes.

use super::routes::RouteInfo;
use serde_json::{json, Map, Value};

/// Builds an OpenAPI 3 document listing `routes` as `GET` operations.
#[must_use]
pub fn api_description(routes: &[RouteInfo]) -> Value {
    let paths: Map<String, Value> = routes
        .iter()
        .map(|route| {
            let operation = json!({
                "get": {
                    "operationId": route.name,
                    "summary": route.summary,
                    "responses": {
                        "200": {
                            "description": "Success",
                            "content": { route.content_type: {} }
                        }
                    }
                }
            });
            (route.path.to_string(), operation)
        })
        .collect();

    json!({
        "openapi": "3.0.1",
        "info": {
            "title": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
        },
        "paths": paths,
    })
}
