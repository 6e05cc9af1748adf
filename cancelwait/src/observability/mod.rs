//! Observability utilities.

mod logging;
mod timer;

pub use logging::{init_tracing, DEFAULT_FILTER};
pub use timer::SpanTimer;
