//! Cancellation token for cooperative cancellation.

use futures::future::select_all;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// A callback type for cancellation notifications.
///
/// The callback receives the cancellation reason.
pub type CancelCallback = Box<dyn Fn(&str) + Send + Sync>;

/// Reason recorded when [`CancellationToken::cancel_after`] fires.
pub const TIMEOUT_REASON: &str = "timeout";

#[derive(Default)]
struct TokenState {
    /// The reason for cancellation (first one wins).
    reason: Option<String>,
    /// Callbacks still waiting for the trigger, keyed for removal.
    callbacks: Vec<(u64, CancelCallback)>,
    next_key: u64,
}

/// A one-way signal for cooperative cancellation.
///
/// A token starts active and moves to triggered at most once. Cancellation is
/// idempotent: only the first reason is kept. Tokens form a tree through
/// [`child_token`](Self::child_token); a child is triggered, with the
/// ancestor's reason, when any ancestor is cancelled, but cancelling a child
/// never touches its parent.
pub struct CancellationToken {
    /// Set once `state.reason` holds the trigger reason.
    cancelled: AtomicBool,
    state: Mutex<TokenState>,
    /// Wakes tasks parked in [`cancelled`](Self::cancelled).
    signal: watch::Sender<bool>,
    /// The token this one was derived from.
    parent: Option<Arc<CancellationToken>>,
    /// Key of the callback that forwards the parent's trigger to this token.
    forwarding: Option<u64>,
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::with_parent(None, None)
    }
}

impl CancellationToken {
    /// Creates a new root cancellation token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_parent(parent: Option<Arc<Self>>, forwarding: Option<u64>) -> Self {
        Self {
            cancelled: AtomicBool::new(false),
            state: Mutex::new(TokenState::default()),
            signal: watch::Sender::new(false),
            parent,
            forwarding,
        }
    }

    /// Creates a token that is cancelled whenever `self` (or any of its
    /// ancestors) is cancelled.
    ///
    /// Dropping the child removes its registration from `self`.
    #[must_use]
    pub fn child_token(self: &Arc<Self>) -> Arc<Self> {
        Arc::new_cyclic(|child: &std::sync::Weak<Self>| {
            let child = child.clone();
            // Fails when `self` is already triggered; the child then sees it through its lineage.
            let forwarding = self
                .register(Box::new(move |reason| {
                    if let Some(child) = child.upgrade() {
                        child.trigger(reason, false);
                    }
                }))
                .ok();
            Self::with_parent(Some(Arc::clone(self)), forwarding)
        })
    }

    /// Requests cancellation with a reason.
    ///
    /// This is idempotent - only the first reason is kept, and a token whose
    /// ancestor is already cancelled keeps the ancestor's reason.
    /// Callbacks are invoked immediately. Panics in callbacks are logged and suppressed.
    pub fn cancel(&self, reason: impl Into<String>) {
        let reason = reason.into();
        if self.trigger(&reason, true) {
            debug!(reason = %reason, "Cancellation requested");
        }
    }

    /// Moves this token to triggered and runs its callbacks.
    ///
    /// Returns false if the token was already triggered.
    fn trigger(&self, reason: &str, check_ancestors: bool) -> bool {
        let callbacks = {
            let mut state = self.state.lock();
            if state.reason.is_some() || (check_ancestors && self.ancestor_cancelled()) {
                return false;
            }
            state.reason = Some(reason.to_string());
            self.cancelled.store(true, Ordering::SeqCst);
            std::mem::take(&mut state.callbacks)
        };

        self.signal.send_replace(true);
        for (_, callback) in &callbacks {
            invoke_callback(callback.as_ref(), reason);
        }
        true
    }

    /// Registers a callback to be invoked when this token is triggered,
    /// whether directly or through an ancestor.
    ///
    /// If already triggered, the callback is invoked immediately.
    pub fn on_cancel<F>(&self, callback: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        if let Err(callback) = self.register(Box::new(callback)) {
            let reason = self.reason().unwrap_or_default();
            invoke_callback(callback.as_ref(), &reason);
        }
    }

    /// Stores `callback` until the trigger, or hands it back if the token is
    /// already triggered.
    fn register(&self, callback: CancelCallback) -> Result<u64, CancelCallback> {
        let mut state = self.state.lock();
        if state.reason.is_some() || self.ancestor_cancelled() {
            return Err(callback);
        }
        let key = state.next_key;
        state.next_key += 1;
        state.callbacks.push((key, callback));
        Ok(key)
    }

    /// Returns whether cancellation has been requested on this token or an ancestor.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.lineage()
            .any(|token| token.cancelled.load(Ordering::SeqCst))
    }

    /// Returns the cancellation reason, if any.
    ///
    /// This is the reason the token was triggered with; it never changes once set.
    #[must_use]
    pub fn reason(&self) -> Option<String> {
        self.lineage()
            .find_map(|token| token.state.lock().reason.clone())
    }

    /// Waits until this token or one of its ancestors is cancelled.
    ///
    /// Returns immediately if cancellation was already requested.
    pub async fn cancelled(&self) {
        let waits = self.lineage().map(|token| {
            let mut rx = token.signal.subscribe();
            Box::pin(async move {
                // The sender lives as long as the borrowed token.
                let _ = rx.wait_for(|cancelled| *cancelled).await;
            })
        });
        select_all(waits).await;
    }

    /// Cancels this token with [`TIMEOUT_REASON`] once `duration` elapses.
    ///
    /// The timer holds only a weak reference, so it never keeps the token
    /// alive. Abort the returned handle to disarm it.
    pub fn cancel_after(self: &Arc<Self>, duration: Duration) -> JoinHandle<()> {
        let token = Arc::downgrade(self);
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            if let Some(token) = token.upgrade() {
                token.cancel(TIMEOUT_REASON);
            }
        })
    }

    fn ancestor_cancelled(&self) -> bool {
        self.parent
            .as_deref()
            .is_some_and(CancellationToken::is_cancelled)
    }

    fn lineage(&self) -> impl Iterator<Item = &Self> {
        std::iter::successors(Some(self), |token| token.parent.as_deref())
    }
}

impl Drop for CancellationToken {
    fn drop(&mut self) {
        if let (Some(parent), Some(key)) = (&self.parent, self.forwarding) {
            parent.state.lock().callbacks.retain(|(k, _)| *k != key);
        }
    }
}

fn invoke_callback(callback: &(dyn Fn(&str) + Send + Sync), reason: &str) {
    if let Err(e) = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        callback(reason);
    })) {
        warn!("Cancellation callback panicked: {:?}", e);
    }
}

impl std::fmt::Debug for CancellationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancellationToken")
            .field("cancelled", &self.is_cancelled())
            .field("reason", &self.reason())
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}
