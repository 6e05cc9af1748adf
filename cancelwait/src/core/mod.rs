//! Core domain model types.
//!
//! This module contains:
//! - The tagged outcome of an operation invocation
//! - The outcome status enum

mod outcome;
mod status;

pub use outcome::Outcome;
pub use status::OutcomeStatus;
