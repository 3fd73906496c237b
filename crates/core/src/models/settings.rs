use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Base URL used when `FORECAST_API_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Request timeout used when `FORECAST_API_TIMEOUT_SECS` is not set.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Connection settings for the prediction service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Base URL without trailing slash (e.g., "http://localhost:8000/api")
    pub base_url: String,

    /// Bounded wait for each request, in seconds
    pub timeout_secs: u64,
}

impl ClientSettings {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout_secs,
        }
    }

    /// Read settings from `FORECAST_API_URL` and `FORECAST_API_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientSettings::from_env`], with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("FORECAST_API_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = match lookup("FORECAST_API_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    CoreError::Config(format!(
                        "FORECAST_API_TIMEOUT_SECS must be a whole number of seconds, got '{raw}'"
                    ))
                })?;
                if secs == 0 {
                    return Err(CoreError::Config(
                        "FORECAST_API_TIMEOUT_SECS must be greater than zero".into(),
                    ));
                }
                secs
            }
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self::new(base_url, timeout_secs))
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS)
    }
}
