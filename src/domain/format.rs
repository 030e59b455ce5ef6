//! Rendering helpers for loosely-typed API values.
//!
//! Responses are never modelled as structs; fields are read as optional
//! `serde_json::Value`s and absent or mistyped fields render as empty text.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

/// Smallest units (satoshi) per display unit (BTC).
pub const SATOSHIS_PER_BTC: f64 = 100_000_000.0;

/// Label used for transactions without a containing block.
pub const UNCONFIRMED: &str = "Unconfirmed";

/// Convert an amount in satoshi to BTC.
pub fn satoshis_to_btc(satoshis: f64) -> f64 {
    satoshis / SATOSHIS_PER_BTC
}

/// Plain text of a scalar value. Missing and `null` render as "".
pub fn value_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Satoshi field rendered as a BTC amount (`150000000` -> `1.5`).
pub fn format_btc(satoshis: Option<&Value>) -> String {
    satoshis
        .and_then(Value::as_f64)
        .map(|s| satoshis_to_btc(s).to_string())
        .unwrap_or_default()
}

/// Unix-seconds field rendered as ISO-8601 UTC with millisecond precision.
///
/// The conversion goes through `seconds * 1000` milliseconds, so `0` becomes
/// `1970-01-01T00:00:00.000Z`.
pub fn format_timestamp(seconds: Option<&Value>) -> String {
    seconds
        .and_then(Value::as_f64)
        .and_then(|s| DateTime::<Utc>::from_timestamp_millis((s * 1000.0) as i64))
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_default()
}

/// Block height, or "Unconfirmed" when the field is absent, null or zero.
pub fn block_height(value: Option<&Value>) -> String {
    match value {
        Some(v) if is_truthy(v) => value_text(Some(v)),
        _ => UNCONFIRMED.to_string(),
    }
}

/// Length of an array field; anything else counts as empty.
pub fn array_len(value: Option<&Value>) -> usize {
    value.and_then(Value::as_array).map_or(0, Vec::len)
}

/// Number with `,` thousands separators and at most three fraction digits.
///
/// `1234567.891` -> `1,234,567.891`, `42.5` -> `42.5`, `1000` -> `1,000`.
pub fn format_grouped(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let rounded = format!("{:.3}", value.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = value < 0.0 && (int_part != "0" || !frac.is_empty());
    let sign = if negative { "-" } else { "" };
    if frac.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac}")
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
