use serde::{Deserialize, Serialize};

use super::prediction::{ConfidenceLevel, Prediction};

/// Default number of symbols kept in [`RecentPredictions`].
pub const DEFAULT_RECENT_CAPACITY: usize = 10;

/// One row of the "Recent Predictions" table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentPrediction {
    pub symbol: String,
    pub predicted_close: f64,
    /// Clamped to [0, 100]
    pub confidence: f64,
    pub level: ConfidenceLevel,
    pub model: String,
}

/// The latest successful prediction per symbol, newest first.
///
/// A new prediction for a symbol replaces its previous row and moves it to
/// the front. The oldest rows fall off once `capacity` is exceeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentPredictions {
    entries: Vec<RecentPrediction>,
    capacity: usize,
}

impl RecentPredictions {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Record a prediction for `symbol` (upper-cased).
    pub fn record(&mut self, symbol: &str, prediction: &Prediction) {
        let symbol = symbol.to_uppercase();
        self.entries.retain(|e| e.symbol != symbol);
        self.entries.insert(
            0,
            RecentPrediction {
                symbol,
                predicted_close: prediction.predicted_close,
                confidence: prediction.clamped_confidence(),
                level: prediction.confidence_level(),
                model: prediction.model.clone(),
            },
        );
        self.entries.truncate(self.capacity);
    }

    pub fn get(&self, symbol: &str) -> Option<&RecentPrediction> {
        let upper = symbol.to_uppercase();
        self.entries.iter().find(|e| e.symbol == upper)
    }

    /// Rows, newest first.
    pub fn entries(&self) -> &[RecentPrediction] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for RecentPredictions {
    fn default() -> Self {
        Self::new(DEFAULT_RECENT_CAPACITY)
    }
}
