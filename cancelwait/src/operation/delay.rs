//! Race between a timer and a cancellation signal.

use crate::cancellation::CancellationToken;
use crate::errors::OperationError;
use std::time::Duration;

const UNSPECIFIED_REASON: &str = "cancelled";

/// Sleeps for `duration` unless `token` is cancelled first.
///
/// Cancellation wins ties: a token that is already cancelled, or that fires
/// in the same poll as the timer, yields `Err(OperationError::Cancelled)`.
pub async fn cancellable_delay(
    duration: Duration,
    token: &CancellationToken,
) -> Result<(), OperationError> {
    tokio::select! {
        biased;
        () = token.cancelled() => Err(OperationError::cancelled(
            token.reason().unwrap_or_else(|| UNSPECIFIED_REASON.to_string()),
        )),
        () = tokio::time::sleep(duration) => Ok(()),
    }
}
