//! Equal-principal convention: the same slice of principal every period plus
//! interest on the outstanding balance, so payments decline over the term.

use rust_decimal::Decimal;

use super::{cycle_month, loan_total, month_rate, overflow, validate_loan};
use crate::types::{LoanInput, LoanSummary, Money, PeriodEntry, Rate};
use crate::HouseLoanResult;

fn capital_per_period(loan_total: Money, months: u32) -> Money {
    loan_total / Decimal::from(months)
}

/// Balance left after `paid` equal slices of principal.
fn outstanding(loan_total: Money, capital: Money, paid: u32) -> HouseLoanResult<Money> {
    capital
        .checked_mul(Decimal::from(paid))
        .map(|repaid| loan_total - repaid)
        .ok_or_else(|| overflow("outstanding balance"))
}

/// Interest due in period `index` (0-based).
fn period_interest(loan_total: Money, capital: Money, rate: Rate, index: u32) -> HouseLoanResult<Money> {
    outstanding(loan_total, capital, index)?
        .checked_mul(rate)
        .ok_or_else(|| overflow("period interest"))
}

/// Headline figures for an equal-principal loan. `month_payment` is the
/// first (largest) payment.
pub fn summarize(input: &LoanInput) -> HouseLoanResult<LoanSummary> {
    validate_loan(input)?;

    let loan_total = loan_total(input)?;
    let rate = month_rate(input);
    let capital = capital_per_period(loan_total, input.months);

    let mut repayment_total = Decimal::ZERO;
    for i in 0..input.months {
        let interest = period_interest(loan_total, capital, rate, i)?;
        repayment_total = capital
            .checked_add(interest)
            .and_then(|payment| repayment_total.checked_add(payment))
            .ok_or_else(|| overflow("total repayment"))?;
    }

    let first_interest = period_interest(loan_total, capital, rate, 0)?;
    let month_payment = capital
        .checked_add(first_interest)
        .ok_or_else(|| overflow("first payment"))?;

    Ok(LoanSummary {
        loan_total,
        month_payment,
        repayment_total,
        interest_total: repayment_total - loan_total,
    })
}

/// Period-by-period schedule for an equal-principal loan.
pub fn schedule(input: &LoanInput) -> HouseLoanResult<Vec<PeriodEntry>> {
    validate_loan(input)?;

    let loan_total = loan_total(input)?;
    let rate = month_rate(input);
    let capital = capital_per_period(loan_total, input.months);

    (0..input.months)
        .map(|i| {
            let interest = period_interest(loan_total, capital, rate, i)?;
            let repayment = capital
                .checked_add(interest)
                .ok_or_else(|| overflow("period repayment"))?;
            Ok(PeriodEntry {
                stage: i + 1,
                month: cycle_month(i),
                interest,
                capital,
                repayment,
                surplus: outstanding(loan_total, capital, i + 1)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HouseLoanError;
    use crate::types::RepaymentStyle;
    use rust_decimal_macros::dec;

    fn sample_loan() -> LoanInput {
        LoanInput {
            total: dec!(3),
            rate: dec!(3.25),
            months: 48,
            style: RepaymentStyle::EqualPrincipal,
        }
    }

    #[test]
    fn test_summary_first_payment() {
        let summary = summarize(&sample_loan()).unwrap();
        // 30000 / 48 = 625 principal, 30000 * 0.0325 / 12 = 81.25 interest
        assert_eq!(summary.loan_total, dec!(30000));
        assert!((summary.month_payment - dec!(706.25)).abs() < dec!(0.0000001));
    }

    #[test]
    fn test_summary_totals() {
        let summary = summarize(&sample_loan()).unwrap();
        // Interest = r * 625 * (48 + 47 + ... + 1) = r * 625 * 1176
        let expected_interest = dec!(0.0325) / dec!(12) * dec!(625) * dec!(1176);
        assert!((summary.interest_total - expected_interest).abs() < dec!(0.000001));
        assert!((summary.interest_total - dec!(1990.625)).abs() < dec!(0.000001));
        assert_eq!(
            summary.repayment_total - summary.loan_total,
            summary.interest_total
        );
    }

    #[test]
    fn test_constant_capital() {
        let periods = schedule(&sample_loan()).unwrap();
        assert_eq!(periods.len(), 48);
        assert!(periods.iter().all(|p| p.capital == dec!(625)));
    }

    #[test]
    fn test_surplus_strictly_decreasing_to_zero() {
        let periods = schedule(&sample_loan()).unwrap();
        for pair in periods.windows(2) {
            assert!(pair[1].surplus < pair[0].surplus);
            assert!(pair[1].repayment < pair[0].repayment);
        }
        assert!(periods[47].surplus.abs() < dec!(0.000001));
    }

    #[test]
    fn test_schedule_agrees_with_summary() {
        let input = sample_loan();
        let summary = summarize(&input).unwrap();
        let periods = schedule(&input).unwrap();

        assert_eq!(periods[0].repayment, summary.month_payment);
        let total: Money = periods.iter().map(|p| p.repayment).sum();
        assert_eq!(total, summary.repayment_total);
    }

    #[test]
    fn test_markers_wrap_every_twelve() {
        let periods = schedule(&sample_loan()).unwrap();
        let months: Vec<u32> = periods.iter().take(14).map(|p| p.month).collect();
        assert_eq!(months, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 1, 2]);
        assert_eq!(periods[47].stage, 48);
    }

    #[test]
    fn test_huge_total_is_impossible() {
        let mut input = sample_loan();
        input.total = dec!(10000000000000000000000000);
        assert!(matches!(
            summarize(&input),
            Err(HouseLoanError::FinancialImpossibility(_))
        ));
        assert!(matches!(
            schedule(&input),
            Err(HouseLoanError::FinancialImpossibility(_))
        ));
    }

    #[test]
    fn test_huge_rate_is_impossible() {
        // 1e6 base units at a monthly rate near 8.3e23 overflows the first interest term
        let mut input = sample_loan();
        input.total = dec!(100);
        input.rate = dec!(1000000000000000000000000000);
        input.months = 12;
        assert!(matches!(
            summarize(&input),
            Err(HouseLoanError::FinancialImpossibility(_))
        ));
        assert!(matches!(
            schedule(&input),
            Err(HouseLoanError::FinancialImpossibility(_))
        ));
    }

    #[test]
    fn test_zero_rate() {
        let input = LoanInput {
            total: dec!(100),
            rate: Decimal::ZERO,
            months: 12,
            style: RepaymentStyle::EqualPrincipal,
        };
        let summary = summarize(&input).unwrap();
        let loan_total = dec!(1000000);
        assert_eq!(summary.month_payment, loan_total / dec!(12));
        assert!(summary.interest_total.abs() < dec!(0.000000001));

        let periods = schedule(&input).unwrap();
        assert!(periods.iter().all(|p| p.interest.is_zero()));
    }
}
