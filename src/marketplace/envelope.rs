//! Normalization of the `get_view` RPC response envelope.
//!
//! Depending on how the RPC is invoked, Supabase returns the row set in one
//! of four shapes: an empty collection, an object carrying `results`/`total`,
//! that same object wrapped in a one-element array, or the bare row array.
//! The object form must be recognized before any array scanning.

use serde_json::{Map, Value};

use super::coerce;

/// Canonical form of a list response: the rows in upstream order plus the
/// total count when the backend reported one.
#[derive(Debug)]
pub struct NormalizedList {
    pub rows: Vec<Value>,
    pub total: Option<i64>,
}

/// The envelope shapes `get_view` is known to produce, in resolution order.
#[derive(Debug)]
enum ListEnvelope {
    /// Empty collection. PHP's decoder folded `{}` and `[]` into the same
    /// value, so both count as empty here.
    Empty,
    /// `{"results": [...], "total": n}`
    Wrapped(Map<String, Value>),
    /// `[{"results": [...], "total": n}]`, the RPC wrapping quirk.
    WrappedInArray(Map<String, Value>),
    /// The value is the row collection itself.
    Raw(Value),
}

fn classify(value: Value) -> ListEnvelope {
    match value {
        Value::Array(items) if items.is_empty() => ListEnvelope::Empty,
        Value::Object(map) if map.is_empty() => ListEnvelope::Empty,
        Value::Object(map) if map.contains_key("results") => ListEnvelope::Wrapped(map),
        Value::Array(mut items) => {
            let first_has_results = items
                .first()
                .and_then(Value::as_object)
                .is_some_and(|obj| obj.contains_key("results"));
            if first_has_results {
                match items.swap_remove(0) {
                    Value::Object(map) => ListEnvelope::WrappedInArray(map),
                    _ => unreachable!("first element checked to be an object"),
                }
            } else {
                ListEnvelope::Raw(Value::Array(items))
            }
        }
        other => ListEnvelope::Raw(other),
    }
}

/// Resolve a raw `get_view` response into `(rows, total)`.
///
/// Never fails: every input shape resolves to a canonical value.
pub fn normalize_list(value: Value) -> NormalizedList {
    match classify(value) {
        ListEnvelope::Empty => NormalizedList {
            rows: Vec::new(),
            total: Some(0),
        },
        ListEnvelope::Wrapped(map) | ListEnvelope::WrappedInArray(map) => {
            let total = coerce::to_int(map.get("total"));
            let rows = map
                .get("results")
                .cloned()
                .map(normalize_rows)
                .unwrap_or_default();
            NormalizedList { rows, total }
        }
        ListEnvelope::Raw(value) => NormalizedList {
            rows: normalize_rows(value),
            total: None,
        },
    }
}

/// A single associative row (string keys, not a sequence) is wrapped into a
/// one-element list; a sequence passes through; anything else has no rows.
fn normalize_rows(value: Value) -> Vec<Value> {
    match value {
        Value::Array(rows) => rows,
        Value::Object(map) if !map.is_empty() => vec![Value::Object(map)],
        _ => Vec::new(),
    }
}
