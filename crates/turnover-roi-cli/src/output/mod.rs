pub mod csv_out;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("JSON serialization error: {}", e),
    }
}

/// Flatten nested objects into dotted keys (`metrics.roi_percent`).
/// Arrays are kept whole for the caller to render.
pub fn flatten(map: &Map<String, Value>) -> Vec<(String, Value)> {
    let mut rows = Vec::new();
    flatten_into("", map, &mut rows);
    rows
}

fn flatten_into(prefix: &str, map: &Map<String, Value>, rows: &mut Vec<(String, Value)>) {
    for (key, val) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(inner) => flatten_into(&name, inner, rows),
            other => rows.push((name, other.clone())),
        }
    }
}

/// Scalar rendering shared by the text formatters.
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// Insight-like entries (`{"message": ..}` or `{"marker": .., "text": ..}`)
/// as display lines; `None` for any other array.
pub fn insight_lines(items: &[Value]) -> Option<Vec<String>> {
    items
        .iter()
        .map(|item| {
            let map = item.as_object()?;
            if let Some(Value::String(text)) = map.get("text") {
                let marker = map.get("marker").and_then(Value::as_str).unwrap_or("-");
                Some(format!("{marker} {text}"))
            } else {
                map.get("message").and_then(Value::as_str).map(|m| format!("- {m}"))
            }
        })
        .collect()
}
