use serde::{Deserialize, Serialize};

use super::bar::HistoricalBar;

/// Confidence assumed when the service omits it.
pub const DEFAULT_CONFIDENCE: f64 = 85.0;

/// Model name assumed when the service omits it.
pub const DEFAULT_MODEL: &str = "ARIMA";

/// A canonical close-price prediction, derived once per request from the
/// raw service payload. A new request produces a new value; nothing is
/// mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Symbol echoed by the service, if any
    pub symbol: Option<String>,

    /// Predicted close for today
    pub predicted_close: f64,

    /// Confidence in percent (nominally 0–100, not enforced upstream)
    pub confidence: f64,

    /// Forecasting model that produced the value (e.g., "ARIMA", "Prophet")
    pub model: String,

    /// `true` when the service served a previously computed prediction
    pub cache_hit: bool,

    /// Where the value came from ("cached", "new_training"), if reported
    pub source: Option<String>,

    /// Date the prediction applies to, as sent
    pub prediction_date: Option<String>,

    /// Yesterday's close as seen by the service
    pub yesterday_close: Option<f64>,

    /// Explicit expected change reported by the service, in percent
    pub change_percent: Option<f64>,

    /// Number of historical days the model was fitted on
    pub data_points: Option<u64>,

    /// Human-readable note from the service
    pub message: Option<String>,

    /// Forecast for the following days, in upstream order
    pub next_days: Vec<FutureDay>,

    /// Whether `next_days` arrived ordered by day number
    pub day_order: DayOrder,
}

impl Prediction {
    /// Build a prediction with every optional field at its default.
    pub fn new(predicted_close: f64) -> Self {
        Self {
            symbol: None,
            predicted_close,
            confidence: DEFAULT_CONFIDENCE,
            model: DEFAULT_MODEL.to_string(),
            cache_hit: false,
            source: None,
            prediction_date: None,
            yesterday_close: None,
            change_percent: None,
            data_points: None,
            message: None,
            next_days: Vec::new(),
            day_order: DayOrder::Ascending,
        }
    }

    /// Replace the forecast days, recomputing `day_order`.
    pub fn with_next_days(mut self, next_days: Vec<FutureDay>) -> Self {
        self.day_order = DayOrder::of(&next_days);
        self.next_days = next_days;
        self
    }

    /// Confidence clamped to [0, 100]. A non-finite confidence counts as 0.
    pub fn clamped_confidence(&self) -> f64 {
        if self.confidence.is_finite() {
            self.confidence.clamp(0.0, 100.0)
        } else {
            0.0
        }
    }

    pub fn confidence_level(&self) -> ConfidenceLevel {
        ConfidenceLevel::from_confidence(self.confidence)
    }

    /// Yesterday's close, falling back to the fetched bar's close.
    pub fn reference_close(&self, bar: Option<&HistoricalBar>) -> Option<f64> {
        self.yesterday_close.or_else(|| bar.and_then(|b| b.close))
    }

    /// Expected change from yesterday's close, in percent.
    ///
    /// An explicit `change_percent` from the service wins, even when it
    /// disagrees with the derived value. Otherwise the change is derived from
    /// [`Prediction::reference_close`] when that base is positive.
    pub fn expected_change_pct(&self, bar: Option<&HistoricalBar>) -> Option<f64> {
        if let Some(explicit) = self.change_percent {
            return Some(explicit);
        }
        let base = self.reference_close(bar)?;
        if base > 0.0 {
            Some((self.predicted_close - base) / base * 100.0)
        } else {
            None
        }
    }
}

/// A single forecast day following the prediction date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FutureDay {
    /// 1 for tomorrow, 2 for the day after, ...
    pub day_number: u32,

    /// Date as sent by the service (may be empty or malformed)
    pub date: String,

    pub predicted_close: f64,

    /// Signed change from the previous day, in percent
    pub change_from_previous: Option<f64>,
}

impl FutureDay {
    pub fn new(day_number: u32, date: impl Into<String>, predicted_close: f64) -> Self {
        Self {
            day_number,
            date: date.into(),
            predicted_close,
            change_from_previous: None,
        }
    }
}

/// Reported ordering of a forecast sequence. Never enforced: the sequence is
/// kept exactly as the service sent it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayOrder {
    /// Day numbers are non-decreasing (duplicates allowed)
    Ascending,
    /// At least one day number is smaller than its predecessor
    NonMonotonic,
}

impl DayOrder {
    pub fn of(days: &[FutureDay]) -> Self {
        if days.windows(2).all(|w| w[0].day_number <= w[1].day_number) {
            DayOrder::Ascending
        } else {
            DayOrder::NonMonotonic
        }
    }
}

/// Badge tier for a prediction's confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    /// Tier for a raw confidence; the value is clamped to [0, 100] first.
    pub fn from_confidence(confidence: f64) -> Self {
        let c = if confidence.is_finite() {
            confidence.clamp(0.0, 100.0)
        } else {
            0.0
        };
        if c >= 88.0 {
            ConfidenceLevel::High
        } else if c >= 75.0 {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfidenceLevel::High => write!(f, "High"),
            ConfidenceLevel::Medium => write!(f, "Medium"),
            ConfidenceLevel::Low => write!(f, "Low"),
        }
    }
}
