// File: crates/fractal-core/src/record.rs
// Summary: OHLC record model and normalization of loosely-typed input into records.
// Notes:
// - Geometry downstream assumes low <= min(open, close) <= max(open, close) <= high,
//   but normalization does not enforce it.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::{EngineError, Result};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Record {
    pub time: i64, // epoch milliseconds
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Record {
    pub const fn new(time: i64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self { time, open, high, low, close }
    }
}

/// Normalize a JSON array of record-like objects into canonical records.
///
/// Non-array input is rejected with [`EngineError::InvalidDataShape`]. Numeric
/// fields are coerced: numbers as-is, numeric strings parsed (empty string is
/// 0), booleans 1/0, null 0, anything else NaN. A missing or falsy `time`
/// defaults to `now`.
pub fn normalize(input: &Value, now: DateTime<Utc>) -> Result<Vec<Record>> {
    let items = input
        .as_array()
        .ok_or_else(|| EngineError::InvalidDataShape(format!("records must be an array, got {}", kind_of(input))))?;
    let fallback = now.timestamp_millis();
    Ok(items.iter().map(|item| normalize_one(item, fallback)).collect())
}

fn normalize_one(item: &Value, fallback_time: i64) -> Record {
    let field = |name: &str| coerce_number(item.get(name));
    Record {
        time: coerce_time(item.get("time")).unwrap_or(fallback_time),
        open: field("open"),
        high: field("high"),
        low: field("low"),
        close: field("close"),
    }
}

fn coerce_number(v: Option<&Value>) -> f64 {
    match v {
        None => f64::NAN,
        Some(Value::Null) => 0.0,
        Some(Value::Bool(b)) => if *b { 1.0 } else { 0.0 },
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() { 0.0 } else { s.parse::<f64>().unwrap_or(f64::NAN) }
        }
        Some(_) => f64::NAN,
    }
}

// Zero, empty and unparseable times count as missing.
fn coerce_time(v: Option<&Value>) -> Option<i64> {
    let t = match v? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|d| d.timestamp_millis()))
        }
        _ => None,
    }?;
    (t != 0).then_some(t)
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
