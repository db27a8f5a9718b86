//! Answer presence and text rendering.

use serde_json::Value;

/// String values stored by older form versions in place of a missing answer
const PLACEHOLDERS: &[&str] = &["null", "undefined", "n/a"];

/// Strip one `{ "value": X }` wrapper layer
pub fn unwrap_value(value: &Value) -> &Value {
    match value {
        Value::Object(map) => map.get("value").unwrap_or(value),
        _ => value,
    }
}

fn is_placeholder(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty() || PLACEHOLDERS.contains(&trimmed.to_ascii_lowercase().as_str())
}

/// Whether a raw value counts as an answer.
///
/// A missing key should be passed as `None`.
pub fn is_answered(value: Option<&Value>) -> bool {
    value.is_some_and(|v| is_answered_value(unwrap_value(v)))
}

fn is_answered_value(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(text) => !is_placeholder(text),
        Value::Bool(_) | Value::Number(_) => true,
        Value::Array(items) => items.iter().any(|item| is_answered_value(unwrap_value(item))),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Display text for a raw value; empty for anything unanswered
pub fn render_answer_text(value: Option<&Value>) -> String {
    match value {
        Some(v) if is_answered(Some(v)) => render_value(unwrap_value(v)),
        _ => String::new(),
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.trim().to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(unwrap_value)
            .filter(|item| is_answered_value(item))
            .map(render_value)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(map) => map
            .iter()
            .filter(|(_, v)| is_answered_value(unwrap_value(v)))
            .map(|(k, v)| format!("{}: {}", k, render_value(unwrap_value(v))))
            .collect::<Vec<_>>()
            .join("; "),
    }
}
