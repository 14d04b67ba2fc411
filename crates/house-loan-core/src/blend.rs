//! Blended loans: two sub-loans amortized independently over the same term
//! and reported as one per-period sum.

use log::debug;

use crate::amortization::{self, overflow};
use crate::error::HouseLoanError;
use crate::types::{
    BlendedLoanInput, LoanComparison, LoanSummary, Money, PeriodEntry, RepaymentStyle,
};
use crate::HouseLoanResult;

fn sum(a: Money, b: Money, field: &str) -> HouseLoanResult<Money> {
    a.checked_add(b)
        .ok_or_else(|| overflow(&format!("blended {field}")))
}

/// Field-wise sum of two summaries of the same convention.
pub fn merge_summaries(a: &LoanSummary, b: &LoanSummary) -> HouseLoanResult<LoanSummary> {
    Ok(LoanSummary {
        loan_total: sum(a.loan_total, b.loan_total, "loanTotal")?,
        month_payment: sum(a.month_payment, b.month_payment, "monthPayment")?,
        repayment_total: sum(a.repayment_total, b.repayment_total, "repaymentTotal")?,
        interest_total: sum(a.interest_total, b.interest_total, "interestTotal")?,
    })
}

/// Sum one period of each schedule. `stage` and `month` come from `a`.
pub fn merge_periods(a: &PeriodEntry, b: &PeriodEntry) -> HouseLoanResult<PeriodEntry> {
    Ok(PeriodEntry {
        stage: a.stage,
        month: a.month,
        interest: sum(a.interest, b.interest, "interest")?,
        capital: sum(a.capital, b.capital, "capital")?,
        repayment: sum(a.repayment, b.repayment, "repayment")?,
        surplus: sum(a.surplus, b.surplus, "surplus")?,
    })
}

/// Pairwise merge of two schedules by position.
pub fn merge_schedules(a: &[PeriodEntry], b: &[PeriodEntry]) -> HouseLoanResult<Vec<PeriodEntry>> {
    if a.len() != b.len() {
        return Err(HouseLoanError::InvalidInput {
            field: "months".into(),
            reason: format!(
                "Blended schedules must have equal length ({} vs {})",
                a.len(),
                b.len()
            ),
        });
    }
    a.iter().zip(b).map(|(x, y)| merge_periods(x, y)).collect()
}

fn check_terms(input: &BlendedLoanInput) -> HouseLoanResult<()> {
    if input.found_loan.months != input.business_loan.months {
        return Err(HouseLoanError::InvalidInput {
            field: "months".into(),
            reason: format!(
                "Blended sub-loans must share a term ({} vs {} months)",
                input.found_loan.months, input.business_loan.months
            ),
        });
    }
    Ok(())
}

/// Summaries of both conventions for a blended loan.
pub fn blended_summaries(input: &BlendedLoanInput) -> HouseLoanResult<LoanComparison<LoanSummary>> {
    check_terms(input)?;
    debug!("merging blended loan summaries");

    let merged = |style| -> HouseLoanResult<LoanSummary> {
        let found = amortization::summarize(&input.found_loan, style)?;
        let business = amortization::summarize(&input.business_loan, style)?;
        merge_summaries(&found, &business)
    };

    Ok(LoanComparison {
        equal_payment: merged(RepaymentStyle::EqualPayment)?,
        equal_principal: merged(RepaymentStyle::EqualPrincipal)?,
    })
}

/// Merged schedule of one convention for a blended loan.
pub fn blended_schedule(
    input: &BlendedLoanInput,
    style: RepaymentStyle,
) -> HouseLoanResult<Vec<PeriodEntry>> {
    check_terms(input)?;
    debug!("merging blended {style} schedules");

    let found = amortization::schedule(&input.found_loan, style)?;
    let business = amortization::schedule(&input.business_loan, style)?;
    merge_schedules(&found, &business)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LoanInput;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn sub_loan(rate: Decimal, months: u32) -> LoanInput {
        LoanInput {
            total: dec!(1),
            rate,
            months,
            style: RepaymentStyle::EqualPayment,
        }
    }

    fn blended() -> BlendedLoanInput {
        BlendedLoanInput {
            found_loan: sub_loan(dec!(3.25), 12),
            business_loan: sub_loan(dec!(4.9), 12),
            style: RepaymentStyle::EqualPayment,
        }
    }

    #[test]
    fn test_merge_summaries_sums_fields() {
        let a = LoanSummary {
            loan_total: dec!(10000),
            month_payment: dec!(850),
            repayment_total: dec!(10200),
            interest_total: dec!(200),
        };
        let b = LoanSummary {
            loan_total: dec!(20000),
            month_payment: dec!(1700),
            repayment_total: dec!(20500),
            interest_total: dec!(500),
        };
        let merged = merge_summaries(&a, &b).unwrap();
        assert_eq!(merged.loan_total, dec!(30000));
        assert_eq!(merged.month_payment, dec!(2550));
        assert_eq!(merged.repayment_total, dec!(30700));
        assert_eq!(merged.interest_total, dec!(700));
        assert_eq!(merged, merge_summaries(&b, &a).unwrap());
    }

    #[test]
    fn test_merge_overflow_is_impossible() {
        // Each sub-loan fits on its own; the blend does not
        let input = BlendedLoanInput {
            found_loan: LoanInput {
                total: dec!(5000000000000000000000000),
                rate: Decimal::ZERO,
                months: 1,
                style: RepaymentStyle::EqualPayment,
            },
            business_loan: LoanInput {
                total: dec!(5000000000000000000000000),
                rate: Decimal::ZERO,
                months: 1,
                style: RepaymentStyle::EqualPayment,
            },
            style: RepaymentStyle::EqualPayment,
        };
        assert!(matches!(
            blended_summaries(&input),
            Err(HouseLoanError::FinancialImpossibility(_))
        ));
        assert!(matches!(
            blended_schedule(&input, RepaymentStyle::EqualPrincipal),
            Err(HouseLoanError::FinancialImpossibility(_))
        ));
    }

    #[test]
    fn test_merge_schedules_commutative() {
        let input = blended();
        let found = amortization::schedule(&input.found_loan, RepaymentStyle::EqualPayment).unwrap();
        let business =
            amortization::schedule(&input.business_loan, RepaymentStyle::EqualPayment).unwrap();

        let ab = merge_schedules(&found, &business).unwrap();
        let ba = merge_schedules(&business, &found).unwrap();
        assert_eq!(ab, ba);
    }

    #[test]
    fn test_merge_keeps_markers() {
        let input = blended();
        let merged = blended_schedule(&input, RepaymentStyle::EqualPrincipal).unwrap();
        assert_eq!(merged.len(), 12);
        for (i, p) in merged.iter().enumerate() {
            assert_eq!(p.stage, i as u32 + 1);
            assert_eq!(p.month, i as u32 + 1);
            // Two loans of 10000 each, 1/12 principal per period
            assert!((p.capital - dec!(20000) / dec!(12)).abs() < dec!(0.0000001));
        }
    }

    #[test]
    fn test_blended_first_payment_is_sum() {
        let input = blended();
        let found = amortization::summarize(&input.found_loan, RepaymentStyle::EqualPayment).unwrap();
        let business =
            amortization::summarize(&input.business_loan, RepaymentStyle::EqualPayment).unwrap();

        let merged = blended_summaries(&input).unwrap();
        assert_eq!(
            merged.equal_payment.month_payment,
            found.month_payment + business.month_payment
        );

        let schedule = blended_schedule(&input, RepaymentStyle::EqualPayment).unwrap();
        assert_eq!(schedule[0].repayment, merged.equal_payment.month_payment);
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let a = amortization::schedule(&sub_loan(dec!(4.9), 12), RepaymentStyle::EqualPayment).unwrap();
        let b = amortization::schedule(&sub_loan(dec!(4.9), 24), RepaymentStyle::EqualPayment).unwrap();
        assert!(merge_schedules(&a, &b).is_err());
    }

    #[test]
    fn test_mismatched_terms_rejected() {
        let mut input = blended();
        input.business_loan.months = 24;
        assert!(blended_summaries(&input).is_err());
        assert!(blended_schedule(&input, RepaymentStyle::EqualPayment).is_err());
    }
}
