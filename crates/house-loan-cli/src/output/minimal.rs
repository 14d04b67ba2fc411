use serde_json::Value;

use super::{comparison, format_value, result_of, year_groups, CONVENTIONS};

/// Print just the key answer: the monthly payment per convention, or one
/// repayment per line for a schedule.
pub fn print_minimal(value: &Value) {
    let result = result_of(value);

    if let Some(sides) = comparison(result) {
        for ((_, label), side) in CONVENTIONS.iter().zip(sides) {
            let payment = side.get("monthPayment").map(format_value).unwrap_or_default();
            println!("{}: {}", label, payment);
        }
    } else if let Some(groups) = year_groups(result) {
        for (_, periods) in groups {
            for period in periods {
                println!("{}", period.get("repayment").map(format_value).unwrap_or_default());
            }
        }
    } else {
        println!("{}", format_value(result));
    }
}
