use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{flatten, insight_lines, scalar_text};

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => {
                print_object(result);
                print_envelope_notes(map);
            }
            _ => print_object(map),
        },
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", scalar_text(value)),
    }
}

fn print_object(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    let mut lists = Vec::new();

    for (key, val) in flatten(map) {
        match val {
            Value::Array(items) => lists.push((key, items)),
            other => builder.push_record([key, scalar_text(&other)]),
        }
    }
    println!("{}", Table::from(builder));

    for (key, items) in lists {
        println!();
        match insight_lines(&items) {
            Some(lines) => {
                println!("Insights:");
                for line in lines {
                    println!("  {}", line);
                }
            }
            None => {
                println!("{}:", key);
                print_array_table(&items);
            }
        }
    }
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            println!("{}", scalar_text(item));
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(headers.clone());

    for map in arr.iter().filter_map(Value::as_object) {
        let row: Vec<String> = headers
            .iter()
            .map(|h| map.get(h.as_str()).map(scalar_text).unwrap_or_default())
            .collect();
        builder.push_record(row);
    }

    println!("{}", Table::from(builder));
}
