use thiserror::Error;

/// Unified error type for the entire market-forecast-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Normalization ───────────────────────────────────────────────
    #[error("Empty response from prediction service")]
    EmptyResponse,

    #[error("Prediction service reported an error: {0}")]
    ServiceReportedError(String),

    #[error("No predicted close value found in response")]
    NoPredictionValue,

    #[error("Invalid value for '{key}': {value} is not a finite number")]
    InvalidPredictionValue { key: String, value: String },

    // ── Chart Layout ────────────────────────────────────────────────
    #[error("Invalid chart input: {0}")]
    InvalidGeometryInput(String),

    // ── API / Network ───────────────────────────────────────────────
    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── Caller / Environment ────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // reqwest errors embed the full URL; drop any query string.
        let msg = e.to_string();
        CoreError::Network(redact_query(&msg))
    }
}

/// Strip everything after the first `?` in a message.
fn redact_query(msg: &str) -> String {
    match msg.find('?') {
        Some(idx) => format!("{}?<query redacted>", &msg[..idx]),
        None => msg.to_string(),
    }
}
