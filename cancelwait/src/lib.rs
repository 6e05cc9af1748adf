//! # Cancelwait
//!
//! A small web service demonstrating cooperative cancellation.
//!
//! Cancelwait exposes two endpoints:
//!
//! - **`GET /weatherforecast`**: randomly generated forecasts for the coming days
//! - **`GET /endpoint`**: waits five seconds, then answers `Hello World!`; when the
//!   client disconnects, the server shuts down, or a request timeout fires, the
//!   wait is abandoned immediately and the cancellation is logged and re-raised
//!
//! The interesting part is the contract between a request's lifecycle and the
//! operation it starts: every request receives a [`CancellationToken`] derived
//! from the server's shutdown token, and the operation races its delay
//! against that token.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cancelwait::prelude::*;
//!
//! let token = CancellationToken::new();
//! let greeting = DelayedGreeting::new();
//!
//! match greeting.invoke(&token).await {
//!     Outcome::Success(body) => println!("{body}"),
//!     Outcome::Cancelled { reason } => println!("cancelled: {reason}"),
//!     Outcome::Failure(cause) => println!("failed: {cause}"),
//! }
//! ```
//!
//! [`CancellationToken`]: crate::cancellation::CancellationToken

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod cancellation;
pub mod config;
pub mod core;
pub mod errors;
pub mod events;
pub mod forecast;
pub mod observability;
pub mod operation;
pub mod server;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::cancellation::{CancelOnDrop, CancellationToken};
    pub use crate::config::{Environment, LogFormat, ServiceConfig};
    pub use crate::core::{Outcome, OutcomeStatus};
    pub use crate::errors::{ConfigError, OperationError, ServiceError};
    pub use crate::events::{
        CollectingEventSink, EventKind, EventSink, LoggingEventSink, OperationEvent,
    };
    pub use crate::forecast::{generate, ForecastGenerator, WeatherForecast};
    pub use crate::operation::{cancellable_delay, CancellableOperation, DelayedGreeting};
    pub use crate::server::{build_router, AppState, RequestCancellation};
}
