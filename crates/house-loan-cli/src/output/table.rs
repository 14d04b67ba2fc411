use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{comparison, format_value, result_of, year_groups, CONVENTIONS};

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    let result = result_of(value);

    if let Some(sides) = comparison(result) {
        print_comparison(sides);
    } else if let Some(groups) = year_groups(result) {
        print_years(&groups);
    } else if let Value::Object(map) = result {
        print_flat_object(map);
    } else {
        println!("{}", format_value(result));
    }

    if let Some(Value::Array(warnings)) = value.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                println!("  - {}", format_value(w));
            }
        }
    }

    if let Some(Value::String(meth)) = value.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_comparison(sides: [&Map<String, Value>; 2]) {
    let mut builder = Builder::default();
    builder.push_record(["Field", CONVENTIONS[0].1, CONVENTIONS[1].1]);
    for key in sides[0].keys() {
        let other = sides[1].get(key).map(format_value).unwrap_or_default();
        builder.push_record([key.clone(), format_value(&sides[0][key]), other]);
    }
    println!("{}", Table::from(builder));
}

fn print_years(groups: &[(&Value, &Vec<Value>)]) {
    for (year, periods) in groups {
        println!("Year {}", format_value(year));
        print_periods(periods);
        println!();
    }
}

fn print_periods(periods: &[Value]) {
    let Some(Value::Object(first)) = periods.first() else {
        println!("(empty)");
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);
    for period in periods {
        let row: Vec<String> = headers
            .iter()
            .map(|h| period.get(h).map(format_value).unwrap_or_default())
            .collect();
        builder.push_record(row);
    }
    println!("{}", Table::from(builder));
}

fn print_flat_object(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &format_value(val)]);
    }
    println!("{}", Table::from(builder));
}
