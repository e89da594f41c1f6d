//! JSON conversion for parsed values.
//!
//! This module provides conversion from [`Value`] to JSON using serde_json.
//! Enable the `serde` feature to use this module.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::{json, Map, Value as JsonValue};

use crate::types::Value;

/// Convert a parsed value to a JSON value.
///
/// # Mapping Rules
///
/// | Value | JSON Type |
/// |-------|-----------|
/// | `EmptyString` | `""` |
/// | `Integer` | `number` |
/// | `Float` | `number`, whole values printed without a fraction (`null` for NaN, `"Infinity"` when out of range) |
/// | `String` | `string` |
/// | `Sequence` | `array` |
/// | `Mapping` | `object`, keys in insertion order |
///
/// # Example
///
/// ```rust
/// use print_r_core::{from_str, to_json};
///
/// let value = from_str("Array\n(\n    [name] => John\n    [age] => 30\n)").unwrap();
/// assert_eq!(to_json(&value), serde_json::json!({"name": "John", "age": 30}));
/// ```
pub fn to_json(value: &Value) -> JsonValue {
    match value {
        Value::EmptyString => JsonValue::String(String::new()),
        Value::Integer(i) => json!(*i),
        Value::Float(f) => float_to_json(*f),
        Value::String(s) => JsonValue::String(s.to_string()),
        Value::Sequence(items) => JsonValue::Array(items.iter().map(to_json).collect()),
        Value::Mapping(entries) => {
            let mut map = Map::with_capacity(entries.len());
            for (k, v) in entries {
                map.insert(k.to_string(), to_json(v));
            }
            JsonValue::Object(map)
        }
    }
}

/// Trees from the parser are at most [`MAX_DEPTH`](crate::MAX_DEPTH) deep,
/// which bounds the recursion here and in `Serialize`.
#[allow(clippy::float_cmp, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn float_to_json(f: f64) -> JsonValue {
    // `u64::MAX as f64` is 2^64, so the strict bound keeps the cast exact.
    if f.fract() == 0.0 && f >= 0.0 && f < u64::MAX as f64 {
        json!(f as u64)
    } else if f.is_nan() {
        JsonValue::Null
    } else if f.is_infinite() {
        if f.is_sign_positive() {
            json!("Infinity")
        } else {
            json!("-Infinity")
        }
    } else {
        json!(f)
    }
}

/// Convert a parsed value to a compact JSON string.
///
/// # Example
///
/// ```rust
/// use print_r_core::{from_str, json::to_json_string};
///
/// let value = from_str("Array\n(\n    [b] => 1\n    [a] => x\n)").unwrap();
/// assert_eq!(to_json_string(&value).unwrap(), r#"{"b":1,"a":"x"}"#);
/// ```
pub fn to_json_string(value: &Value) -> serde_json::Result<String> {
    serde_json::to_string(value)
}

/// Convert a parsed value to a JSON string indented by two spaces.
pub fn to_json_string_pretty(value: &Value) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

impl Serialize for Value<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::EmptyString => serializer.serialize_str(""),
            Value::Integer(i) => serializer.serialize_u64(*i),
            Value::Float(f) => float_to_json(*f).serialize(serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Mapping(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}
