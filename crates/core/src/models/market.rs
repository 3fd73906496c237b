use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A ticker symbol for a stock or crypto pair (e.g. "AAPL", "BTC-USD").
///
/// Input is case-insensitive and canonicalized to upper-case. No other
/// validation happens client-side; the prediction service decides whether
/// a symbol actually exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketSymbol(String);

impl MarketSymbol {
    /// Trim and upper-case user input. Blank input is rejected.
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(CoreError::ValidationError(
                "Market symbol must not be empty".into(),
            ));
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MarketSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An entry of the markets catalogue (`GET /markets`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Market {
    /// Display name (e.g., "Apple")
    pub name: String,

    /// Ticker symbol as sent by the service
    pub symbol: String,
}

impl Market {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
        }
    }

    /// The built-in catalogue shown before (or instead of) `/markets`.
    pub fn defaults() -> Vec<Market> {
        vec![
            Market::new("Apple", "AAPL"),
            Market::new("Microsoft", "MSFT"),
            Market::new("Google", "GOOG"),
            Market::new("Tesla", "TSLA"),
            Market::new("Amazon", "AMZN"),
            Market::new("Bitcoin", "BTC-USD"),
            Market::new("Ethereum", "ETH-USD"),
        ]
    }

    /// Label used in the market picker, e.g. "Apple (AAPL)".
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.symbol)
    }
}
