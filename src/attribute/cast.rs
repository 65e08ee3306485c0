//! Coercion of stored translations to their declared [`ValueKind`].

use serde_json::{
    Number,
    Value,
};

use super::ValueKind;

/// Coerces `raw` to `kind`. Never fails: unparseable input falls back to the kind's zero value.
#[must_use]
pub fn cast_value(raw: Value, kind: ValueKind) -> Value {
    match kind {
        ValueKind::String => raw,
        ValueKind::Bool => Value::Bool(is_truthy(&raw)),
        ValueKind::Integer => Value::from(to_integer(&raw)),
        ValueKind::Float => Number::from_f64(to_float(&raw)).map_or(Value::from(0), Value::Number),
        ValueKind::Array => to_structured(raw),
    }
}

/// Loose truthiness: `null`, `false`, `0`, `""`, `"0"` and empty containers are false.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn to_integer(value: &Value) -> i64 {
    match value {
        Value::Bool(b) => i64::from(*b),
        Value::Number(n) => n.as_i64().unwrap_or_else(|| n.as_f64().map_or(0, |f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().unwrap_or_else(|_| s.parse::<f64>().map_or(0, |f| f as i64))
        }
        Value::Array(items) => i64::from(!items.is_empty()),
        Value::Object(map) => i64::from(!map.is_empty()),
        Value::Null => 0,
    }
}

fn to_float(value: &Value) -> f64 {
    match value {
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64().unwrap_or_default(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()).unwrap_or_default(),
        Value::Array(items) => f64::from(u8::from(!items.is_empty())),
        Value::Object(map) => f64::from(u8::from(!map.is_empty())),
        Value::Null => 0.0,
    }
}

fn to_structured(value: Value) -> Value {
    match value {
        Value::Array(_) | Value::Object(_) => value,
        Value::Null => Value::Array(Vec::new()),
        Value::String(s) if s.is_empty() => Value::Array(Vec::new()),
        Value::String(s) => match serde_json::from_str::<Value>(&s) {
            Ok(decoded @ (Value::Array(_) | Value::Object(_))) => decoded,
            _ => Value::Array(vec![Value::String(s)]),
        },
        scalar => Value::Array(vec![scalar]),
    }
}
