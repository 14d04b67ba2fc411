use serde_json::Value;
use std::io;

use super::{comparison, format_value, result_of, year_groups, CONVENTIONS};

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    let result = result_of(value);

    if let Some(sides) = comparison(result) {
        // One row per convention
        let headers: Vec<&str> = sides[0].keys().map(|k| k.as_str()).collect();
        let mut header_row = vec!["style"];
        header_row.extend(&headers);
        let _ = wtr.write_record(&header_row);

        for ((code, _), side) in CONVENTIONS.iter().zip(sides) {
            let mut row = vec![code.to_string()];
            row.extend(
                headers
                    .iter()
                    .map(|h| side.get(*h).map(format_value).unwrap_or_default()),
            );
            let _ = wtr.write_record(&row);
        }
    } else if let Some(groups) = year_groups(result) {
        // Flattened schedule with a leading year column
        let Some(Value::Object(first)) = groups.first().and_then(|(_, data)| data.first()) else {
            return;
        };
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        let mut header_row = vec!["year"];
        header_row.extend(&headers);
        let _ = wtr.write_record(&header_row);

        for (year, periods) in &groups {
            for period in periods.iter() {
                let mut row = vec![format_value(year)];
                row.extend(
                    headers
                        .iter()
                        .map(|h| period.get(*h).map(format_value).unwrap_or_default()),
                );
                let _ = wtr.write_record(&row);
            }
        }
    } else if let Value::Object(map) = result {
        let _ = wtr.write_record(["field", "value"]);
        for (key, val) in map {
            let _ = wtr.write_record([key.as_str(), &format_value(val)]);
        }
    } else {
        let _ = wtr.write_record([&format_value(result)]);
    }

    let _ = wtr.flush();
}
