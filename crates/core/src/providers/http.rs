use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::market::{Market, MarketSymbol};
use crate::models::settings::ClientSettings;
use crate::services::market_service::parse_markets;
use super::traits::ForecastProvider;

const PROVIDER_NAME: &str = "Forecast API";

/// Prediction service provider over plain HTTP + JSON.
///
/// - **Endpoints**: `/markets`, `/market-data/{symbol}`, `/predict/{symbol}`
/// - **Timeout**: bounded by [`ClientSettings::timeout_secs`] (native only)
/// - **No retries**: a failed request is reported once.
pub struct HttpForecastProvider {
    client: Client,
    base_url: String,
}

impl HttpForecastProvider {
    pub fn new(settings: &ClientSettings) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(settings.timeout_secs));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build `{base_url}/{segments...}`, percent-encoding each segment.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, CoreError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            CoreError::Config(format!("Invalid base URL '{}': {e}", self.base_url))
        })?;
        url.path_segments_mut()
            .map_err(|_| CoreError::Config(format!("Base URL '{}' cannot take a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json(&self, segments: &[&str]) -> Result<Option<Value>, CoreError> {
        let url = self.endpoint(segments)?;
        tracing::debug!(%url, "GET");

        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            let message = error_message(status, &body);
            tracing::warn!(%status, %message, "prediction service request failed");
            return Err(CoreError::Api {
                provider: PROVIDER_NAME.into(),
                message,
            });
        }

        parse_body(&body)
    }
}

impl Default for HttpForecastProvider {
    fn default() -> Self {
        Self::new(&ClientSettings::default())
    }
}

/// Decode a response body. Blank bodies and JSON `null` become `None`.
pub fn parse_body(body: &str) -> Result<Option<Value>, CoreError> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    match serde_json::from_str::<Value>(body)? {
        Value::Null => Ok(None),
        value => Ok(Some(value)),
    }
}

/// Best-effort message for a failed request: the JSON `detail` or `message`
/// field when present, otherwise the status line.
pub fn error_message(status: StatusCode, body: &str) -> String {
    let from_body = serde_json::from_str::<Value>(body).ok().and_then(|v| {
        ["detail", "message"]
            .iter()
            .find_map(|k| v.get(*k).and_then(Value::as_str).map(str::to_string))
    });
    from_body.unwrap_or_else(|| match status.canonical_reason() {
        Some(reason) => format!("HTTP {} {reason}", status.as_u16()),
        None => format!("HTTP {}", status.as_u16()),
    })
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl ForecastProvider for HttpForecastProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn list_markets(&self) -> Result<Vec<Market>, CoreError> {
        match self.get_json(&["markets"]).await? {
            Some(payload) => parse_markets(&payload),
            None => Err(CoreError::EmptyResponse),
        }
    }

    async fn fetch_market_data(&self, symbol: &MarketSymbol) -> Result<Option<Value>, CoreError> {
        self.get_json(&["market-data", symbol.as_str()]).await
    }

    async fn fetch_prediction(&self, symbol: &MarketSymbol) -> Result<Option<Value>, CoreError> {
        self.get_json(&["predict", symbol.as_str()]).await
    }
}
