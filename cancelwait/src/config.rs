//! Service configuration read from environment variables.

use crate::errors::ConfigError;
use crate::forecast::DEFAULT_FORECAST_COUNT;
use crate::operation::DEFAULT_DELAY;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

/// Selects development or production behavior.
pub const ENVIRONMENT_VAR: &str = "CANCELWAIT_ENVIRONMENT";
/// Listener address.
pub const BIND_ADDRESS_VAR: &str = "CANCELWAIT_BIND_ADDRESS";
/// Delay of the `/endpoint` operation, in milliseconds.
pub const OPERATION_DELAY_VAR: &str = "CANCELWAIT_OPERATION_DELAY_MS";
/// Number of forecasts served by `/weatherforecast`.
pub const FORECAST_COUNT_VAR: &str = "CANCELWAIT_FORECAST_COUNT";
/// Optional per-request timeout, in milliseconds.
pub const REQUEST_TIMEOUT_VAR: &str = "CANCELWAIT_REQUEST_TIMEOUT_MS";
/// Log output format.
pub const LOG_FORMAT_VAR: &str = "CANCELWAIT_LOG_FORMAT";

/// Hosting environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// Exposes the API description document.
    Development,
    /// Default; hides development-only routes.
    #[default]
    Production,
}

impl Environment {
    /// Returns true for [`Environment::Development`].
    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err("expected 'development' or 'production'".to_string()),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err("expected 'pretty' or 'json'".to_string()),
        }
    }
}

/// Configuration for the HTTP service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Hosting environment.
    #[serde(default)]
    pub environment: Environment,
    /// Address the listener binds to.
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,
    /// Delay of the cancellable operation in milliseconds.
    #[serde(default = "default_operation_delay_ms")]
    pub operation_delay_ms: u64,
    /// Forecasts per `/weatherforecast` response.
    #[serde(default = "default_forecast_count")]
    pub forecast_count: usize,
    /// Cancels a request's token after this many milliseconds, if set.
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,
    /// Log output format.
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 5000))
}

fn default_operation_delay_ms() -> u64 {
    u64::try_from(DEFAULT_DELAY.as_millis()).unwrap_or(u64::MAX)
}

fn default_forecast_count() -> usize {
    DEFAULT_FORECAST_COUNT
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            bind_address: default_bind_address(),
            operation_delay_ms: default_operation_delay_ms(),
            forecast_count: default_forecast_count(),
            request_timeout_ms: None,
            log_format: LogFormat::default(),
        }
    }
}

impl ServiceConfig {
    /// Creates a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = parse_var(&lookup, ENVIRONMENT_VAR)? {
            config.environment = value;
        }
        if let Some(value) = parse_var(&lookup, BIND_ADDRESS_VAR)? {
            config.bind_address = value;
        }
        if let Some(value) = parse_var(&lookup, OPERATION_DELAY_VAR)? {
            config.operation_delay_ms = value;
        }
        if let Some(value) = parse_var(&lookup, FORECAST_COUNT_VAR)? {
            config.forecast_count = value;
        }
        if let Some(value) = parse_var(&lookup, REQUEST_TIMEOUT_VAR)? {
            config.request_timeout_ms = Some(value);
        }
        if let Some(value) = parse_var(&lookup, LOG_FORMAT_VAR)? {
            config.log_format = value;
        }

        Ok(config)
    }

    /// Sets the environment.
    #[must_use]
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Sets the operation delay.
    #[must_use]
    pub fn with_operation_delay(mut self, delay: Duration) -> Self {
        self.operation_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Sets the forecast count.
    #[must_use]
    pub fn with_forecast_count(mut self, count: usize) -> Self {
        self.forecast_count = count;
        self
    }

    /// Gets the operation delay as Duration.
    #[must_use]
    pub fn operation_delay(&self) -> Duration {
        Duration::from_millis(self.operation_delay_ms)
    }

    /// Gets the request timeout as Duration.
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|e: T::Err| ConfigError::new(key, trimmed, e.to_string()))
}
