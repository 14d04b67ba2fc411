//! Equal-payment (annuity) convention: one level payment every period, with
//! the interest share shrinking as the balance is repaid.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;

use super::{cycle_month, loan_total, month_rate, overflow, validate_loan};
use crate::error::HouseLoanError;
use crate::types::{LoanInput, LoanSummary, Money, PeriodEntry, Rate};
use crate::HouseLoanResult;

/// Level payment `P * r * (1+r)^n / ((1+r)^n - 1)`.
///
/// A zero rate makes the closed form 0/0, so the principal is spread evenly
/// over the term instead.
pub fn level_payment(principal: Money, month_rate: Rate, months: u32) -> HouseLoanResult<Money> {
    if months == 0 {
        return Err(HouseLoanError::InvalidInput {
            field: "months".into(),
            reason: "Loan term must be at least 1 month".into(),
        });
    }

    let straight_line = principal / Decimal::from(months);
    if month_rate.is_zero() {
        return Ok(straight_line);
    }

    let growth = (Decimal::ONE + month_rate)
        .checked_powu(u64::from(months))
        .ok_or_else(|| {
            HouseLoanError::FinancialImpossibility(format!(
                "annuity factor overflows for a monthly rate of {month_rate} over {months} months"
            ))
        })?;
    let factor = growth - Decimal::ONE;
    // Rates below Decimal precision compound to exactly 1.
    if factor.is_zero() {
        return Ok(straight_line);
    }

    principal
        .checked_mul(month_rate)
        .and_then(|interest| interest.checked_mul(growth / factor))
        .ok_or_else(|| overflow("level payment"))
}

/// Headline figures for an equal-payment loan.
pub fn summarize(input: &LoanInput) -> HouseLoanResult<LoanSummary> {
    validate_loan(input)?;

    let loan_total = loan_total(input)?;
    let month_payment = level_payment(loan_total, month_rate(input), input.months)?;
    let repayment_total = month_payment
        .checked_mul(Decimal::from(input.months))
        .ok_or_else(|| overflow("total repayment"))?;

    Ok(LoanSummary {
        loan_total,
        month_payment,
        repayment_total,
        interest_total: repayment_total - loan_total,
    })
}

/// Period-by-period schedule for an equal-payment loan.
///
/// Interest accrues on the balance left after the principal paid so far,
/// tracked with a running total.
pub fn schedule(input: &LoanInput) -> HouseLoanResult<Vec<PeriodEntry>> {
    let summary = summarize(input)?;
    let rate = month_rate(input);
    let payment = summary.month_payment;

    let mut periods = Vec::with_capacity(input.months as usize);
    let mut capital_paid = Decimal::ZERO;

    for index in 0..input.months {
        let balance = summary.loan_total - capital_paid;
        let interest = balance
            .checked_mul(rate)
            .ok_or_else(|| overflow("period interest"))?;
        let capital = payment - interest;

        periods.push(PeriodEntry {
            stage: index + 1,
            month: cycle_month(index),
            interest,
            capital,
            repayment: payment,
            surplus: balance - capital,
        });

        capital_paid += capital;
    }

    Ok(periods)
}
