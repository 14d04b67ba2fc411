//! Display formatting: two decimals, truncated, with thousands separators.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::amortization::TEN_THOUSAND;
use crate::schedule::MonthMarker;
use crate::types::{LoanSummary, Money, PeriodEntry};

/// Summary figures ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedSummary {
    /// Ten-thousand units.
    pub loan_total: String,
    /// Base currency units.
    pub month_payment: String,
    /// Ten-thousand units.
    pub repayment_total: String,
    /// Ten-thousand units.
    pub interest_total: String,
}

/// Schedule period ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedPeriod {
    pub stage: u32,
    pub month: u32,
    pub interest: String,
    pub capital: String,
    pub repayment: String,
    pub surplus: String,
}

impl MonthMarker for FormattedPeriod {
    fn month(&self) -> u32 {
        self.month
    }
}

/// Places kept before truncation. Repeating fractions such as `rate / 1200`
/// leave residue in the last digits (81.2499…9 instead of 81.25).
const SETTLE_DP: u32 = 10;

/// Drop everything past the cent, rounding toward zero.
///
/// Digits beyond [`SETTLE_DP`] places are treated as representation error
/// and rounded away first, so a value within 5e-11 of the next cent counts
/// as that cent: `0.99999999999` truncates to `1.00`, `0.9999999999` to `0.99`.
pub fn truncate_cents(value: Decimal) -> Decimal {
    let truncated = value
        .round_dp(SETTLE_DP)
        .round_dp_with_strategy(2, RoundingStrategy::ToZero);
    if truncated.is_zero() {
        Decimal::ZERO
    } else {
        truncated
    }
}

/// Insert `,` every three digits of the integer part. A leading sign and the
/// fractional part are left alone.
pub fn group_thousands(s: &str) -> String {
    let (sign, unsigned) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s),
    };
    let (integer_part, fraction) = match unsigned.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (unsigned, None),
    };

    let digits: Vec<char> = integer_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    match fraction {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Format a money amount: truncated to cents, two decimals, grouped.
pub fn format_money(amount: Money) -> String {
    group_thousands(&format!("{:.2}", truncate_cents(amount)))
}

/// Totals go back to ten-thousand units; the monthly payment stays in base units.
pub fn format_summary(summary: &LoanSummary) -> FormattedSummary {
    FormattedSummary {
        loan_total: format_money(summary.loan_total / TEN_THOUSAND),
        month_payment: format_money(summary.month_payment),
        repayment_total: format_money(summary.repayment_total / TEN_THOUSAND),
        interest_total: format_money(summary.interest_total / TEN_THOUSAND),
    }
}

pub fn format_period(period: &PeriodEntry) -> FormattedPeriod {
    FormattedPeriod {
        stage: period.stage,
        month: period.month,
        interest: format_money(period.interest),
        capital: format_money(period.capital),
        repayment: format_money(period.repayment),
        surplus: format_money(period.surplus),
    }
}

pub fn format_schedule(periods: &[PeriodEntry]) -> Vec<FormattedPeriod> {
    periods.iter().map(format_period).collect()
}
