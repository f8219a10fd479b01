//! Lenient field access over loosely typed JSON records.
//!
//! Transaction payloads arrive from several app versions, so the same value
//! may be a number, a numeric string, blank, or missing entirely. Everything
//! here coerces to a usable value instead of failing.

use serde_json::Value;

/// An accessor pulls one candidate value out of a record.
pub type Accessor<S> = fn(&S) -> Option<String>;

/// Run accessors in order and return the first non-blank result.
pub fn first_text<S>(source: &S, accessors: &[Accessor<S>]) -> Option<String> {
    accessors
        .iter()
        .find_map(|get| get(source).filter(|s| !s.trim().is_empty()))
}

/// Text view of a value: trimmed strings and numbers, nothing else.
pub fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                Some(s.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Text of a field nested inside an object value, e.g. `product.name`.
pub fn nested_text(value: Option<&Value>, key: &str) -> Option<String> {
    match value? {
        Value::Object(map) => text(map.get(key)),
        _ => None,
    }
}

/// Finite number from a JSON number or numeric string. Commas are tolerated
/// so `"1,250.50"` parses.
pub fn number(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let cleaned = s.trim().replace(',', "");
            if cleaned.is_empty() {
                None
            } else {
                cleaned.parse::<f64>().ok()
            }
        }
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

pub fn number_or(value: Option<&Value>, default: f64) -> f64 {
    number(value).unwrap_or(default)
}

/// `value` unless arithmetic on finite inputs overflowed to infinity or NaN.
pub fn finite_or(value: f64, default: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        default
    }
}

/// Key used to look up an id in a name map. Ids show up as strings or numbers.
pub fn id_key(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Object(_) | Value::Array(_) | Value::Null | Value::Bool(_) => None,
        other => text(Some(other)),
    }
}
