use serde::{Deserialize, Serialize};

/// The prior trading day for a symbol, as returned by `/market-data/{symbol}`.
///
/// Every field is optional: a missing value renders as "N/A", never as zero.
/// A bar is replaced wholesale on re-fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoricalBar {
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<u64>,

    /// Number of historical days the service holds for this symbol
    #[serde(alias = "dataPoints")]
    pub data_points: Option<u64>,

    /// Date of the bar, as sent (e.g., "2024-01-10")
    #[serde(alias = "lastUpdated")]
    pub last_updated: Option<String>,

    /// Free-form note from the service
    pub note: Option<String>,
}

impl HistoricalBar {
    /// Intraday range (high − low), when both ends are known.
    pub fn range(&self) -> Option<f64> {
        match (self.high, self.low) {
            (Some(h), Some(l)) => Some(h - l),
            _ => None,
        }
    }

    /// Open-to-close change in percent, when open is known and non-zero.
    pub fn change_pct(&self) -> Option<f64> {
        match (self.open, self.close) {
            (Some(o), Some(c)) if o != 0.0 => Some((c - o) / o * 100.0),
            _ => None,
        }
    }
}
