//! Output formatting functions.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::json;

use typedcache_core::Value;

use crate::cli::OutputFormat;
use crate::commands::Outcome;

/// Formats a command outcome, or returns `None` when there is nothing to print.
///
/// `quiet` suppresses confirmations but never a value that was read.
pub fn format_outcome(outcome: &Outcome, format: OutputFormat, quiet: bool) -> Option<String> {
    if quiet && !matches!(outcome, Outcome::Found(_)) {
        return None;
    }

    let output = match format {
        OutputFormat::Json => {
            let document = match outcome {
                Outcome::Pong => json!({"status": "ok"}),
                Outcome::Stored { key, tag } => {
                    json!({"key": key, "tag": tag.to_string(), "stored": true})
                }
                Outcome::Found(value) => value_to_json(value),
                Outcome::Deleted { key } => json!({"key": key, "deleted": true}),
            };
            document.to_string()
        }
        OutputFormat::Pretty => match outcome {
            Outcome::Pong => "PONG".to_string(),
            Outcome::Stored { key, tag } => format!("Stored {} ({})", key, tag),
            Outcome::Found(value) => format_value(value),
            Outcome::Deleted { key } => format!("Deleted {}", key),
        },
    };

    Some(output)
}

/// Format a value for display.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Text(text) => text.clone(),
        Value::Integer(n) => n.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Bytes(bytes) => STANDARD.encode(bytes),
        Value::Structured(value) => serde_json::to_string_pretty(value).unwrap_or_default(),
    }
}

/// Converts a value to JSON. Bytes become base64 strings and non-finite
/// floats become null.
pub fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Text(text) => serde_json::Value::String(text.clone()),
        Value::Integer(n) => serde_json::Value::from(*n),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::Bytes(bytes) => serde_json::Value::String(STANDARD.encode(bytes)),
        Value::Structured(value) => value.clone(),
    }
}
