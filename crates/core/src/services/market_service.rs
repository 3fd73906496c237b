use serde_json::{Map, Value};

use crate::errors::CoreError;
use crate::models::bar::HistoricalBar;
use crate::models::market::Market;
use crate::services::normalizer::{
    field, finite_number, reported_error, string_field, whole_number,
};

/// Message used when `/market-data` flags an error without explaining it.
pub const DEFAULT_MARKET_DATA_ERROR: &str = "Market data service reported an error";

/// Parse a `/market-data/{symbol}` payload into a [`HistoricalBar`].
///
/// Absent body → `EmptyResponse`; an `error` flag → `ServiceReportedError`.
/// Each field is read on its own: a missing or unusable value stays `None`
/// and never fails the rest of the bar.
pub fn parse_market_data(payload: Option<&Value>) -> Result<HistoricalBar, CoreError> {
    let payload = match payload {
        None | Some(Value::Null) => return Err(CoreError::EmptyResponse),
        Some(p) => p,
    };

    let obj = payload.as_object().ok_or_else(|| {
        CoreError::Deserialization(format!("Market data must be a JSON object, got {payload}"))
    })?;

    if let Some(message) = reported_error(obj, DEFAULT_MARKET_DATA_ERROR) {
        return Err(CoreError::ServiceReportedError(message));
    }

    let bar = HistoricalBar {
        symbol: string_field(obj, &["symbol"]),
        name: string_field(obj, &["name"]),
        open: price_field(obj, "open"),
        high: price_field(obj, "high"),
        low: price_field(obj, "low"),
        close: price_field(obj, "close"),
        volume: count_field(obj, &["volume"]),
        data_points: count_field(obj, &["data_points", "dataPoints"]),
        last_updated: string_field(obj, &["last_updated", "lastUpdated"]),
        note: string_field(obj, &["note"]),
    };
    tracing::debug!(
        symbol = bar.symbol.as_deref().unwrap_or("?"),
        close = ?bar.close,
        "parsed market data"
    );
    Ok(bar)
}

fn price_field(obj: &Map<String, Value>, key: &str) -> Option<f64> {
    let value = field(obj, &[key])?;
    let price = finite_number(value);
    if price.is_none() {
        tracing::warn!(key, %value, "unusable price in market data");
    }
    price
}

fn count_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<u64> {
    let value = field(obj, keys)?;
    let count = whole_number(value);
    if count.is_none() {
        tracing::warn!(key = keys[0], %value, "unusable count in market data");
    }
    count
}

/// Parse a `/markets` payload. Order is preserved as received.
pub fn parse_markets(payload: &Value) -> Result<Vec<Market>, CoreError> {
    if let Some(obj) = payload.as_object() {
        if let Some(message) = reported_error(obj, DEFAULT_MARKET_DATA_ERROR) {
            return Err(CoreError::ServiceReportedError(message));
        }
    }
    let markets: Vec<Market> = serde_json::from_value(payload.clone())?;
    Ok(markets)
}
