//! Request-scoped cancellation.

use super::AppState;
use crate::cancellation::{CancelOnDrop, CancellationToken};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Reason recorded when the handler future is dropped before completing.
pub const DISCONNECT_REASON: &str = "client disconnected";

/// A cancellation signal scoped to one request.
///
/// The token is a child of the server's shutdown token, so it fires on
/// shutdown, on the optional request timeout, or when this value is dropped
/// while still armed. The HTTP runtime drops handler futures when the client
/// goes away, which is how a disconnect reaches the token.
#[derive(Debug)]
pub struct RequestCancellation {
    request_id: Uuid,
    guard: CancelOnDrop,
    timer: Option<JoinHandle<()>>,
}

impl RequestCancellation {
    /// Derives a request token from `parent`, optionally armed with a timeout.
    ///
    /// Must be called within a tokio runtime when `timeout` is set.
    #[must_use]
    pub fn new(parent: &Arc<CancellationToken>, timeout: Option<Duration>) -> Self {
        let token = parent.child_token();
        let timer = timeout.map(|timeout| token.cancel_after(timeout));

        Self {
            request_id: Uuid::new_v4(),
            guard: CancelOnDrop::new(token, DISCONNECT_REASON),
            timer,
        }
    }

    /// Returns the request's token.
    #[must_use]
    pub fn token(&self) -> Arc<CancellationToken> {
        Arc::clone(self.guard.token())
    }

    /// Returns the id used to correlate this request's log lines.
    #[must_use]
    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    /// Marks the request as answered; dropping it no longer cancels the token.
    pub fn complete(&mut self) {
        self.guard.disarm();
    }
}

impl Drop for RequestCancellation {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl FromRequestParts<AppState> for RequestCancellation {
    type Rejection = Infallible;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self::new(&state.shutdown, state.config.request_timeout()))
    }
}
