use serde_json::{Map, Value};

use crate::errors::CoreError;
use crate::models::prediction::{
    DayOrder, FutureDay, Prediction, DEFAULT_CONFIDENCE, DEFAULT_MODEL,
};

/// Preferred key for the predicted close.
pub const CANONICAL_PREDICTION_KEY: &str = "predicted_close";

/// Names the service has used for the predicted close, in lookup order.
/// Only consulted when the canonical key is absent or null.
pub const PREDICTION_KEY_SYNONYMS: &[&str] =
    &["predicted", "close_prediction", "prediction", "forecast"];

/// Keys that may carry the forecast days, in lookup order.
pub const NEXT_DAYS_KEYS: &[&str] = &["next_5_days", "next_days", "nextDays"];

/// Message used when the service flags an error without explaining it.
pub const DEFAULT_SERVICE_ERROR: &str = "Prediction service reported an error";

/// Turns raw `/predict/{symbol}` payloads into canonical [`Prediction`]s.
///
/// Upstream field naming has drifted over time, so the predicted close is
/// located through an ordered key list: the canonical key first, then each
/// synonym. The first key holding a non-null value wins, and that value must
/// be a finite number.
///
/// Pure transform: no I/O, no shared state.
#[derive(Debug, Clone)]
pub struct ResponseNormalizer {
    prediction_keys: Vec<String>,
}

impl ResponseNormalizer {
    /// Canonical key followed by [`PREDICTION_KEY_SYNONYMS`].
    pub fn new() -> Self {
        let mut keys = vec![CANONICAL_PREDICTION_KEY.to_string()];
        keys.extend(PREDICTION_KEY_SYNONYMS.iter().map(|k| k.to_string()));
        Self {
            prediction_keys: keys,
        }
    }

    /// Use a custom priority list. The first key plays the canonical role.
    pub fn with_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prediction_keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// The lookup order for the predicted close.
    pub fn prediction_keys(&self) -> &[String] {
        &self.prediction_keys
    }

    /// Normalize a raw payload.
    ///
    /// - `None` or JSON `null` → [`CoreError::EmptyResponse`]
    /// - a truthy `error` field → [`CoreError::ServiceReportedError`]
    /// - no usable prediction key → [`CoreError::NoPredictionValue`]
    /// - a non-numeric prediction → [`CoreError::InvalidPredictionValue`]
    pub fn normalize(&self, payload: Option<&Value>) -> Result<Prediction, CoreError> {
        let payload = match payload {
            None | Some(Value::Null) => return Err(CoreError::EmptyResponse),
            Some(p) => p,
        };

        let Some(obj) = payload.as_object() else {
            tracing::warn!("prediction payload is not a JSON object");
            return Err(CoreError::NoPredictionValue);
        };

        if let Some(message) = reported_error(obj, DEFAULT_SERVICE_ERROR) {
            return Err(CoreError::ServiceReportedError(message));
        }

        let (key, predicted_close) = self.locate_prediction(obj)?;
        if key != self.prediction_keys[0] {
            tracing::warn!(key, "predicted close taken from synonym key");
        }

        let next_days = map_next_days(obj)?;
        let day_order = DayOrder::of(&next_days);
        if day_order == DayOrder::NonMonotonic {
            tracing::warn!("forecast days are not ordered by day number; keeping upstream order");
        }

        let confidence = match field(obj, &["confidence"]) {
            Some(v) => finite_number(v).unwrap_or_else(|| {
                tracing::warn!(value = %v, "unusable confidence, using default");
                DEFAULT_CONFIDENCE
            }),
            None => DEFAULT_CONFIDENCE,
        };

        let prediction = Prediction {
            symbol: string_field(obj, &["symbol"]),
            predicted_close,
            confidence,
            model: string_field(obj, &["model"])
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            cache_hit: field(obj, &["cache_hit", "cacheHit"])
                .and_then(Value::as_bool)
                .unwrap_or(false),
            source: string_field(obj, &["source"]),
            prediction_date: string_field(obj, &["prediction_date", "predictionDate"]),
            yesterday_close: field(obj, &["yesterday_close", "yesterdayClose"])
                .and_then(finite_number),
            change_percent: field(obj, &["change_percent", "changePercent"])
                .and_then(finite_number),
            data_points: field(obj, &["data_points", "dataPoints"]).and_then(whole_number),
            message: string_field(obj, &["message"]),
            next_days,
            day_order,
        };

        tracing::debug!(
            key,
            predicted_close,
            days = prediction.next_days.len(),
            cache_hit = prediction.cache_hit,
            "normalized prediction"
        );
        Ok(prediction)
    }

    /// Find the predicted close: the first key in priority order whose value
    /// is present and non-null. Returns that key and its numeric value.
    pub fn locate_prediction<'a>(
        &'a self,
        obj: &Map<String, Value>,
    ) -> Result<(&'a str, f64), CoreError> {
        let (key, value) = self
            .prediction_keys
            .iter()
            .find_map(|k| match obj.get(k) {
                None | Some(Value::Null) => None,
                Some(v) => Some((k.as_str(), v)),
            })
            .ok_or(CoreError::NoPredictionValue)?;

        let number = finite_number(value).ok_or_else(|| CoreError::InvalidPredictionValue {
            key: key.to_string(),
            value: value.to_string(),
        })?;
        Ok((key, number))
    }
}

impl Default for ResponseNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize with the default key list.
pub fn normalize_prediction(payload: Option<&Value>) -> Result<Prediction, CoreError> {
    ResponseNormalizer::new().normalize(payload)
}

/// If the payload carries a truthy `error` flag, return the service message
/// (`message`, else `detail`, else `default_message`).
pub(crate) fn reported_error(obj: &Map<String, Value>, default_message: &str) -> Option<String> {
    let flagged = match obj.get("error") {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Object(_)) | Some(Value::Array(_)) => true,
        _ => false,
    };
    if !flagged {
        return None;
    }
    let message = string_field(obj, &["message", "detail"])
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| default_message.to_string());
    Some(message)
}

fn map_next_days(obj: &Map<String, Value>) -> Result<Vec<FutureDay>, CoreError> {
    let Some((key, items)) = NEXT_DAYS_KEYS
        .iter()
        .find_map(|k| obj.get(*k).and_then(Value::as_array).map(|a| (*k, a)))
    else {
        return Ok(Vec::new());
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| -> Result<FutureDay, CoreError> {
            let day = item.as_object().ok_or_else(|| CoreError::InvalidPredictionValue {
                key: format!("{key}[{i}]"),
                value: item.to_string(),
            })?;

            let close_value = field(day, &["predicted_close", "predictedClose"]);
            let predicted_close = close_value.and_then(finite_number).ok_or_else(|| {
                CoreError::InvalidPredictionValue {
                    key: format!("{key}[{i}].predicted_close"),
                    value: close_value.map_or_else(|| "undefined".to_string(), Value::to_string),
                }
            })?;

            // Day numbers start at 1; a missing one takes the position.
            let day_number = match field(day, &["day_number", "dayNumber"]) {
                None => i as u32 + 1,
                Some(v) => whole_number(v)
                    .and_then(|n| u32::try_from(n).ok())
                    .filter(|n| *n >= 1)
                    .ok_or_else(|| CoreError::InvalidPredictionValue {
                        key: format!("{key}[{i}].day_number"),
                        value: v.to_string(),
                    })?,
            };

            Ok(FutureDay {
                day_number,
                date: string_field(day, &["date"]).unwrap_or_default(),
                predicted_close,
                change_from_previous: field(day, &["change_from_previous", "changeFromPrevious"])
                    .and_then(finite_number),
            })
        })
        .collect()
}

// ── Field access helpers ────────────────────────────────────────────

/// First non-null value among `keys`.
pub(crate) fn field<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find(|v| !v.is_null())
}

pub(crate) fn string_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    field(obj, keys).and_then(Value::as_str).map(str::to_string)
}

/// A finite number, from a JSON number or a numeric string. Never coerces
/// anything else to zero.
pub(crate) fn finite_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// A non-negative integer, also from `5000000.0` or `"250"`.
pub(crate) fn whole_number(value: &Value) -> Option<u64> {
    if let Some(n) = value.as_u64() {
        return Some(n);
    }
    let f = finite_number(value)?;
    (f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64).then_some(f as u64)
}
