//! Permissive coercion of upstream JSON scalars into typed values.
//!
//! The Supabase views are loosely typed: counts arrive as numbers or numeric
//! strings, flags as booleans, numbers or strings, timestamps as strings.
//! Every function here is total: unusable input yields `None`, never an
//! error, so one malformed field can never poison a whole row.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

/// Coerce a JSON value into an integer. Numeric strings are accepted,
/// fractional values are truncated. `null` and the empty string yield `None`.
pub fn to_int(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            if s.is_empty() {
                return None;
            }
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
        }
        _ => None,
    }
}

/// Coerce a JSON value into a float, with the same rules as [`to_int`].
pub fn to_float(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            if s.is_empty() {
                return None;
            }
            s.parse::<f64>().ok()
        }
        _ => None,
    }
}

/// Coerce a JSON value into a tri-state boolean.
///
/// Native booleans pass through; `1`/`"1"`/`"true"` and `0`/`"0"`/`"false"`
/// map to `true`/`false`. Anything else, `null` included, is `None`,
/// never `false`.
pub fn to_bool(value: Option<&Value>) -> Option<bool> {
    match value? {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        Value::String(s) => match s.as_str() {
            "1" | "true" => Some(true),
            "0" | "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Parse a JSON string into a UTC timestamp. Non-strings, empty strings and
/// unparsable values yield `None`.
pub fn to_datetime(value: Option<&Value>) -> Option<DateTime<Utc>> {
    let s = value?.as_str()?;
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }

    None
}

/// Extract a JSON string field as an owned `String`.
pub fn to_text(value: Option<&Value>) -> Option<String> {
    value?.as_str().map(str::to_owned)
}

/// Extract a JSON array field as an owned row list.
pub fn to_array(value: Option<&Value>) -> Option<Vec<Value>> {
    value?.as_array().cloned()
}
