use serde_json::{Map, Value};
use std::io;

use super::{flatten, insight_lines, scalar_text};

type StdoutWriter<'a> = csv::Writer<io::StdoutLock<'a>>;

/// Write output as CSV to stdout.
///
/// A result holding a list of records (sensitivity points) becomes one row
/// per record; anything else becomes two columns, field and value.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result {
        Value::Object(map) => match record_list(map) {
            Some(records) => write_records(&mut wtr, records),
            None => write_fields(&mut wtr, map),
        },
        Value::Array(arr) => write_records(&mut wtr, arr),
        other => {
            let _ = wtr.write_record([scalar_text(other)]);
        }
    }

    let _ = wtr.flush();
}

fn record_list(map: &Map<String, Value>) -> Option<&Vec<Value>> {
    match map.get("points") {
        Some(Value::Array(points)) if !points.is_empty() => Some(points),
        _ => None,
    }
}

fn write_fields(wtr: &mut StdoutWriter<'_>, map: &Map<String, Value>) {
    let _ = wtr.write_record(["field", "value"]);
    for (key, val) in flatten(map) {
        match &val {
            Value::Array(items) => match insight_lines(items) {
                Some(lines) => {
                    for (i, line) in lines.iter().enumerate() {
                        let _ = wtr.write_record([format!("{key}.{i}"), line.clone()]);
                    }
                }
                None => {
                    let _ = wtr.write_record([key, scalar_text(&val)]);
                }
            },
            _ => {
                let _ = wtr.write_record([key, scalar_text(&val)]);
            }
        }
    }
}

fn write_records(wtr: &mut StdoutWriter<'_>, arr: &[Value]) {
    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            let _ = wtr.write_record([scalar_text(item)]);
        }
        return;
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    let _ = wtr.write_record(&headers);

    for map in arr.iter().filter_map(Value::as_object) {
        let row: Vec<String> = headers
            .iter()
            .map(|h| map.get(*h).map(scalar_text).unwrap_or_default())
            .collect();
        let _ = wtr.write_record(&row);
    }
}
