//! Mapping of operation errors onto HTTP responses.

use crate::errors::OperationError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

/// Non-standard status for a request whose client went away (nginx's 499).
pub const CLIENT_CLOSED_REQUEST: u16 = 499;

/// Error returned by handlers.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] OperationError);

/// Returns the 499 status code.
#[must_use]
pub fn client_closed_request() -> StatusCode {
    StatusCode::from_u16(CLIENT_CLOSED_REQUEST).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            OperationError::Cancelled { reason } => {
                warn!(reason = %reason, "Request cancelled before completion");
                client_closed_request().into_response()
            }
            OperationError::Unhandled(message) => {
                error!(error = %message, "Unhandled operation failure");
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
        }
    }
}
