//! Type coercion from a decoded JSON value to its canonical string form.

use serde_json::Value;
use toolgate_types::ParameterType;

/// Render a JSON value to the string form substituted into a single-slot
/// placeholder. Arrays render space-joined when the placeholder is embedded
/// in a larger template; callers expanding an `args`-style bare placeholder
/// into multiple argv entries should use [`coerce_array_elements`] instead.
#[must_use]
pub fn coerce_scalar(value: &Value, param_type: ParameterType) -> String {
    match (param_type, value) {
        (ParameterType::Boolean, Value::Bool(b)) => b.to_string(),
        (ParameterType::Integer | ParameterType::Number, Value::Number(n)) => n.to_string(),
        (ParameterType::Array, Value::Array(items)) => items
            .iter()
            .map(|v| value_to_plain_string(v))
            .collect::<Vec<_>>()
            .join(" "),
        (_, Value::String(s)) => s.clone(),
        _ => value_to_plain_string(value),
    }
}

/// Render each element of a JSON array to its own argv entry.
#[must_use]
pub fn coerce_array_elements(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().map(value_to_plain_string).collect(),
        other => vec![value_to_plain_string(other)],
    }
}

fn value_to_plain_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
