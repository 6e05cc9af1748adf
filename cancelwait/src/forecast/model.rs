//! The forecast value object and its JSON form.

use chrono::NaiveDate;
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Converts Celsius to Fahrenheit as `32 + round(celsius / 0.5556)`.
#[must_use]
pub fn fahrenheit_from_celsius(celsius: i32) -> i32 {
    // `as` saturates at the i32 bounds.
    #[allow(clippy::cast_possible_truncation)]
    let offset = (f64::from(celsius) / 0.5556).round() as i32;
    offset.saturating_add(32)
}

/// A single day's forecast.
///
/// Serializes as `{ "date", "temperatureC", "temperatureF", "summary" }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherForecast {
    date: NaiveDate,
    temperature_c: i32,
    summary: Option<String>,
}

impl WeatherForecast {
    /// Creates a new forecast.
    #[must_use]
    pub fn new(date: NaiveDate, temperature_c: i32, summary: Option<String>) -> Self {
        Self {
            date,
            temperature_c,
            summary,
        }
    }

    /// The forecast date.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Temperature in Celsius.
    #[must_use]
    pub fn temperature_c(&self) -> i32 {
        self.temperature_c
    }

    /// Temperature in Fahrenheit, derived from Celsius.
    #[must_use]
    pub fn temperature_f(&self) -> i32 {
        fahrenheit_from_celsius(self.temperature_c)
    }

    /// Short description, if any.
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }
}

impl Serialize for WeatherForecast {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("WeatherForecast", 4)?;
        state.serialize_field("date", &self.date)?;
        state.serialize_field("temperatureC", &self.temperature_c)?;
        state.serialize_field("temperatureF", &self.temperature_f())?;
        state.serialize_field("summary", &self.summary)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fahrenheit_reference_points() {
        assert_eq!(fahrenheit_from_celsius(0), 32);
        assert_eq!(fahrenheit_from_celsius(100), 212);
        assert_eq!(fahrenheit_from_celsius(-20), -4);
        assert_eq!(fahrenheit_from_celsius(37), 99);
    }

    #[test]
    fn test_serializes_camel_case_with_derived_fahrenheit() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let forecast = WeatherForecast::new(date, 25, Some("Warm".to_string()));

        let json = serde_json::to_value(&forecast).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "date": "2024-03-09",
                "temperatureC": 25,
                "temperatureF": 77,
                "summary": "Warm",
            })
        );
    }

    #[test]
    fn test_missing_summary_serializes_as_null() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let forecast = WeatherForecast::new(date, 0, None);

        let json = serde_json::to_value(&forecast).unwrap();

        assert_eq!(json["summary"], serde_json::Value::Null);
        assert_eq!(forecast.summary(), None);
    }
}
