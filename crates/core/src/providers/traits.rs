use async_trait::async_trait;
use serde_json::Value;

use crate::errors::CoreError;
use crate::models::market::{Market, MarketSymbol};

/// Trait abstraction over the prediction service's HTTP surface.
///
/// Providers only move bytes: they hand back the raw JSON body (or `None`
/// for an empty one) and leave interpretation to the normalizer. Transport
/// failures surface as `Network`/`Api` errors with a readable message.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait ForecastProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// `GET /markets`, in the order the service lists them.
    async fn list_markets(&self) -> Result<Vec<Market>, CoreError>;

    /// `GET /market-data/{symbol}`: the raw prior-day bar payload.
    async fn fetch_market_data(&self, symbol: &MarketSymbol) -> Result<Option<Value>, CoreError>;

    /// `GET /predict/{symbol}`: the raw prediction payload.
    async fn fetch_prediction(&self, symbol: &MarketSymbol) -> Result<Option<Value>, CoreError>;
}
