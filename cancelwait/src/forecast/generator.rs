//! Random forecast generation.

use super::WeatherForecast;
use chrono::{Local, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;

/// The fixed, ordered list of summaries a forecast may carry.
pub const SUMMARIES: [&str; 10] = [
    "Freezing",
    "Bracing",
    "Chilly",
    "Cool",
    "Mild",
    "Warm",
    "Balmy",
    "Hot",
    "Sweltering",
    "Scorching",
];

/// Number of forecasts served per request unless configured otherwise.
pub const DEFAULT_FORECAST_COUNT: usize = 5;

const MIN_TEMPERATURE_C: i32 = -20;
const MAX_TEMPERATURE_C: i32 = 55;

/// Generates `count` forecasts for the days following `today`.
///
/// Day `i` (1-based) is dated `today + i`, has a temperature drawn uniformly
/// from `[-20, 55)` and a summary drawn uniformly from [`SUMMARIES`].
pub fn generate_with<R: Rng>(rng: &mut R, today: NaiveDate, count: usize) -> Vec<WeatherForecast> {
    today
        .iter_days()
        .skip(1)
        .take(count)
        .map(|date| {
            let temperature_c = rng.gen_range(MIN_TEMPERATURE_C..MAX_TEMPERATURE_C);
            let summary = SUMMARIES.choose(rng).map(|s| (*s).to_string());
            WeatherForecast::new(date, temperature_c, summary)
        })
        .collect()
}

/// Generates `count` forecasts starting tomorrow, using the thread-local RNG.
#[must_use]
pub fn generate(count: usize) -> Vec<WeatherForecast> {
    generate_with(&mut rand::thread_rng(), Local::now().date_naive(), count)
}

/// Produces a fixed number of forecasts per call.
#[derive(Debug, Clone, Copy)]
pub struct ForecastGenerator {
    count: usize,
}

impl ForecastGenerator {
    /// Creates a generator producing `count` forecasts per call.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self { count }
    }

    /// Returns how many forecasts each call produces.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Generates a fresh batch of forecasts.
    #[must_use]
    pub fn forecasts(&self) -> Vec<WeatherForecast> {
        generate(self.count)
    }
}

impl Default for ForecastGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_FORECAST_COUNT)
    }
}
