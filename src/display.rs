//! Display formatting for results and environments
//!
//! Hosts choose between plain text, ANSI-colored text for terminals and
//! JSON for machine consumers.

use crate::ast::Value;
use crate::env::Environment;
use crate::error::Error;
use serde_json::{json, Value as JsonValue};

/// Plain rendering, same as `Display`
pub fn format_value(val: &Value) -> String {
    val.to_string()
}

/// Colored rendering for a terminal
pub fn format_value_colored(val: &Value) -> String {
    match val {
        Value::Number(n) => format!("\x1b[35m{}\x1b[0m", n),
        Value::Bool(b) => format!("\x1b[34m{}\x1b[0m", b),
        Value::Key(name) => format!("\x1b[33m#{}\x1b[0m", name),
    }
}

/// One `NAME = value` line per binding, in name order
pub fn format_environment(env: &Environment) -> String {
    let width = env.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    env.iter()
        .map(|(name, value)| format!("{:<width$} = {}", name, value, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `{"value": ...}`. Non-finite numbers become their string form, since JSON
/// has no literal for them.
pub fn value_to_json(val: &Value) -> JsonValue {
    let value = match val {
        Value::Number(n) if !n.is_finite() => JsonValue::String(n.to_string()),
        other => serde_json::to_value(other).unwrap_or(JsonValue::Null),
    };
    json!({ "value": value })
}

/// `{"error": "...", "stage": "scan" | "parse" | "eval"}`
pub fn error_to_json(err: &Error) -> JsonValue {
    let stage = match err {
        Error::Scan(_) => "scan",
        Error::Parse(_) => "parse",
        Error::Eval(_) => "eval",
    };
    let message = match err {
        Error::Scan(e) => e.to_string(),
        Error::Parse(e) => e.to_string(),
        Error::Eval(e) => e.to_string(),
    };
    json!({ "error": message, "stage": stage })
}

pub fn environment_to_json(env: &Environment) -> JsonValue {
    serde_json::to_value(env).unwrap_or(JsonValue::Null)
}
