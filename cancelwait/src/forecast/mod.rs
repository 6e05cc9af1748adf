//! Synthetic weather forecasts.

mod generator;
mod model;

pub use generator::{generate, generate_with, ForecastGenerator, DEFAULT_FORECAST_COUNT, SUMMARIES};
pub use model::{fahrenheit_from_celsius, WeatherForecast};
