//! Drop guard tying a token to the lifetime of its owner.

use super::CancellationToken;
use std::sync::Arc;

/// Guard that cancels a token when dropped.
///
/// Place one inside a future that may be abandoned (for example, an HTTP
/// handler whose client went away): dropping the future drops the guard, and
/// any work observing the token sees the cancellation. Call
/// [`disarm`](Self::disarm) once the work completed normally.
#[derive(Debug)]
pub struct CancelOnDrop {
    token: Arc<CancellationToken>,
    reason: &'static str,
    armed: bool,
}

impl CancelOnDrop {
    /// Creates an armed guard for `token`.
    #[must_use]
    pub fn new(token: Arc<CancellationToken>, reason: &'static str) -> Self {
        Self {
            token,
            reason,
            armed: true,
        }
    }

    /// Returns the guarded token.
    #[must_use]
    pub fn token(&self) -> &Arc<CancellationToken> {
        &self.token
    }

    /// Disarms the guard, preventing cancellation on drop.
    pub fn disarm(&mut self) {
        self.armed = false;
    }

    /// Returns whether the guard will cancel on drop.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        if self.armed {
            self.token.cancel(self.reason);
        }
    }
}
