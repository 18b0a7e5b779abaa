use serde_json::Value;

use super::scalar_text;

/// Headline figures, most important first.
const PRIORITY_KEYS: [&str; 5] = [
    "roi_percent",
    "roi",
    "payback_months",
    "annual_savings",
    "break_even_value",
];

/// Print just the headline value of the output.
///
/// Looks for a priority key in the result object, then in its `metrics`
/// section, then falls back to the first field.
pub fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let Value::Object(map) = result else {
        println!("{}", scalar_text(result));
        return;
    };

    let sections = [Some(map), map.get("metrics").and_then(Value::as_object)];
    for section in sections.into_iter().flatten() {
        for key in PRIORITY_KEYS {
            if let Some(val) = section.get(key).filter(|v| !v.is_null()) {
                println!("{}", scalar_text(val));
                return;
            }
        }
    }

    if let Some((key, val)) = map.iter().next() {
        println!("{}: {}", key, scalar_text(val));
    }
}
