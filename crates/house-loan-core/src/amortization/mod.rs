//! Amortization engine for the two repayment conventions.
//!
//! Every function takes a [`LoanInput`] whose `total` is expressed in
//! ten-thousand currency units and whose `rate` is an annual percentage.
//! Internally the principal is converted to base units
//! (`loan_total = total * 10000`) and the rate to a monthly decimal rate
//! (`month_rate = rate / 100 / 12`). All math in `rust_decimal::Decimal`.

pub mod equal_payment;
pub mod equal_principal;

use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::HouseLoanError;
use crate::types::{LoanInput, LoanSummary, Money, PeriodEntry, Rate, RepaymentStyle};
use crate::HouseLoanResult;

/// Currency units per unit of `LoanInput::total`.
pub const TEN_THOUSAND: Decimal = dec!(10000);

/// Length of the month-of-year cycle used for year grouping.
pub const MONTHS_PER_YEAR: u32 = 12;

/// Reject inputs the engine cannot amortize.
pub fn validate_loan(input: &LoanInput) -> HouseLoanResult<()> {
    if input.months == 0 {
        return Err(HouseLoanError::InvalidInput {
            field: "months".into(),
            reason: "Loan term must be at least 1 month".into(),
        });
    }
    if input.rate < Decimal::ZERO {
        return Err(HouseLoanError::InvalidInput {
            field: "rate".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }
    if input.total < Decimal::ZERO {
        return Err(HouseLoanError::InvalidInput {
            field: "total".into(),
            reason: "Loan amount cannot be negative".into(),
        });
    }
    Ok(())
}

/// Amounts beyond `Decimal::MAX` (about 7.9e28) cannot be amortized.
pub fn overflow(context: &str) -> HouseLoanError {
    HouseLoanError::FinancialImpossibility(format!("{context} exceeds the representable range"))
}

/// Principal in base currency units.
pub fn loan_total(input: &LoanInput) -> HouseLoanResult<Money> {
    input
        .total
        .checked_mul(TEN_THOUSAND)
        .ok_or_else(|| overflow("loan principal"))
}

/// Monthly decimal rate from the annual percentage.
pub fn month_rate(input: &LoanInput) -> Rate {
    input.rate / dec!(100) / Decimal::from(MONTHS_PER_YEAR)
}

/// Month-of-year marker for a 0-based period index: 1..=12, wrapping.
pub fn cycle_month(index: u32) -> u32 {
    index % MONTHS_PER_YEAR + 1
}

/// Summary figures for the requested convention.
pub fn summarize(input: &LoanInput, style: RepaymentStyle) -> HouseLoanResult<LoanSummary> {
    debug!(
        "summarizing {style} loan: total={} rate={} months={}",
        input.total, input.rate, input.months
    );
    match style {
        RepaymentStyle::EqualPayment => equal_payment::summarize(input),
        RepaymentStyle::EqualPrincipal => equal_principal::summarize(input),
    }
}

/// Full period schedule for the requested convention.
pub fn schedule(input: &LoanInput, style: RepaymentStyle) -> HouseLoanResult<Vec<PeriodEntry>> {
    debug!(
        "building {style} schedule: total={} rate={} months={}",
        input.total, input.rate, input.months
    );
    match style {
        RepaymentStyle::EqualPayment => equal_payment::schedule(input),
        RepaymentStyle::EqualPrincipal => equal_principal::schedule(input),
    }
}
