//! Display formatting for prices, percentages and dates.
//!
//! Every function here is total: bad input degrades to a sentinel string
//! ([`NOT_AVAILABLE`] or [`INVALID_DATE`]) instead of failing.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

/// Shown for a missing or non-numeric value.
pub const NOT_AVAILABLE: &str = "N/A";

/// Shown for a date that is present but cannot be parsed.
pub const INVALID_DATE: &str = "Invalid date";

/// Format a price as a two-decimal dollar amount: `182.456` → `"$182.46"`.
pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(p) if p.is_finite() => {
            let sign = if p < 0.0 { "-" } else { "" };
            format!("{sign}${:.2}", p.abs())
        }
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Format an untyped JSON value as a price. Numbers and numeric strings are
/// accepted; anything else is "N/A".
pub fn format_price_value(value: Option<&Value>) -> String {
    let price = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    format_price(price)
}

/// Signed percentage with two decimals: `0.27` → `"+0.27%"`.
pub fn format_percent(pct: Option<f64>) -> String {
    match pct {
        Some(p) if p.is_finite() => format!("{p:+.2}%"),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Whole number with thousands separators: `5000000` → `"5,000,000"`.
pub fn format_volume(volume: Option<u64>) -> String {
    let Some(v) = volume else {
        return NOT_AVAILABLE.to_string();
    };
    let digits = v.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Long US-English date: `"2024-01-12"` → `"Friday, January 12, 2024"`.
pub fn format_date_long(raw: &str) -> String {
    format_date_with(raw, "%A, %B %-d, %Y")
}

/// Short US-English date: `"2024-01-12"` → `"Jan 12"`.
pub fn format_date_short(raw: &str) -> String {
    format_date_with(raw, "%b %-d")
}

fn format_date_with(raw: &str, pattern: &str) -> String {
    if raw.trim().is_empty() {
        return NOT_AVAILABLE.to_string();
    }
    match parse_date(raw) {
        Some(date) => date.format(pattern).to_string(),
        None => INVALID_DATE.to_string(),
    }
}

/// Parse the date forms the service emits: plain dates, ISO timestamps with
/// or without offset.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}
