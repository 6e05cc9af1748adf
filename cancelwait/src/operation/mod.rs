//! Cancellable operations.
//!
//! An operation receives a [`CancellationToken`] owned by its caller, runs
//! until its single suspension point resolves, and either returns a payload
//! or re-raises the cancellation as [`OperationError::Cancelled`].

mod delay;
mod greeting;

pub use delay::cancellable_delay;
pub use greeting::{DelayedGreeting, DEFAULT_DELAY, GREETING};

use crate::cancellation::CancellationToken;
use crate::core::Outcome;
use crate::errors::OperationError;
use async_trait::async_trait;
use std::fmt::Debug;

/// Trait for operations that cooperate with a cancellation signal.
///
/// Implementations are stateless across invocations: every call is
/// independent and observes only the token it was given.
#[async_trait]
pub trait CancellableOperation: Send + Sync + Debug {
    /// The payload produced on success.
    type Output: Send;

    /// Returns the name of the operation.
    fn name(&self) -> &str;

    /// Runs the operation.
    ///
    /// Cancellation is surfaced as `Err(OperationError::Cancelled)` rather
    /// than swallowed, so the caller decides how to report it.
    async fn handle(&self, token: &CancellationToken) -> Result<Self::Output, OperationError>;

    /// Runs the operation and folds the result into an [`Outcome`].
    async fn invoke(&self, token: &CancellationToken) -> Outcome<Self::Output> {
        Outcome::from_result(self.handle(token).await)
    }
}
