//! Cooperative cancellation primitives.
//!
//! This module provides:
//! - CancellationToken, a one-way signal that can be awaited and derived into child tokens
//! - CancelOnDrop, a guard that triggers a token when its owner is dropped early

mod guard;
mod token;

pub use guard::CancelOnDrop;
pub use token::{CancelCallback, CancellationToken, TIMEOUT_REASON};
