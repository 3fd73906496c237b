use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::errors::CoreError;

/// Log output settings for binaries built on this crate.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. "info" or "market_forecast_core=debug"
    pub log_level: String,
}

impl LoggingConfig {
    /// Read `RUST_LOG`, defaulting to "info".
    pub fn from_env() -> Self {
        Self {
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Install a global fmt subscriber. Fails if the filter is malformed or a
/// subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> Result<(), CoreError> {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.log_level)
        .map_err(|e| CoreError::Config(format!("Invalid log filter '{}': {e}", config.log_level)))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| CoreError::Config(format!("Failed to install log subscriber: {e}")))
}
