//! Parameter values and configuration records.

use indexmap::IndexMap;
use serde_yaml::{Number, Value};

/// A single parameter value: a scalar or a simple structured value.
///
/// `Null` is the "no value" marker a candidate configuration may carry.
pub type ParamValue = Value;

/// A configuration record: parameter name to value, in insertion order.
pub type Configuration = IndexMap<String, ParamValue>;

/// Returns true if two parameter values are considered equal.
///
/// Integers and floats compare numerically, so `1` matches `1.0`. Sequences
/// compare element-wise with the same rule. Everything else compares
/// structurally.
pub fn values_match(left: &ParamValue, right: &ParamValue) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => numbers_match(a, b),
        (Value::Sequence(a), Value::Sequence(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| values_match(x, y))
        }
        _ => left == right,
    }
}

fn numbers_match(a: &Number, b: &Number) -> bool {
    if a.is_f64() || b.is_f64() {
        match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    } else {
        a == b
    }
}

/// Renders a value for terminal messages.
///
/// Strings are printed bare, sequences as `[a, b]` and mappings as `{k: v}`.
pub fn display_value(value: &ParamValue) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Sequence(items) => display_values(items),
        Value::Mapping(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", display_value(k), display_value(v)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
        Value::Tagged(tagged) => format!("{} {}", tagged.tag, display_value(&tagged.value)),
    }
}

/// Renders a list of values as `[a, b, c]`.
pub fn display_values(values: &[ParamValue]) -> String {
    let rendered: Vec<String> = values.iter().map(display_value).collect();
    format!("[{}]", rendered.join(", "))
}
