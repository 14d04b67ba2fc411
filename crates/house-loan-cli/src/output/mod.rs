pub mod csv_out;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Column labels for the `"0"` / `"1"` convention keys.
pub const CONVENTIONS: [(&str, &str); 2] = [("0", "Equal payment"), ("1", "Equal principal")];

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(value) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("Failed to render loan result as JSON: {e}"),
        },
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Unwrap the computation envelope if present.
pub fn result_of(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}

/// Both convention objects of a summary comparison.
pub fn comparison(value: &Value) -> Option<[&Map<String, Value>; 2]> {
    let map = value.as_object()?;
    let equal_payment = map.get(CONVENTIONS[0].0)?.as_object()?;
    let equal_principal = map.get(CONVENTIONS[1].0)?.as_object()?;
    Some([equal_payment, equal_principal])
}

/// `(year, periods)` pairs of a grouped schedule.
pub fn year_groups(value: &Value) -> Option<Vec<(&Value, &Vec<Value>)>> {
    value
        .as_array()?
        .iter()
        .map(|group| {
            let group = group.as_object()?;
            Some((group.get("year")?, group.get("data")?.as_array()?))
        })
        .collect()
}

pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
