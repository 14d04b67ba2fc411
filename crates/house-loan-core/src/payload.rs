//! Wire payloads and the two public entry points.
//!
//! Callers send loans as loosely-typed JSON: numbers may arrive as strings,
//! blended sub-loans and detail options arrive as JSON documents encoded
//! inside a string. Everything is decoded once here into [`LoanRequest`];
//! the engine never sees the wire form.

use std::time::Instant;

use log::{debug, warn};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::amortization;
use crate::blend;
use crate::error::HouseLoanError;
use crate::format::{format_schedule, format_summary, FormattedPeriod, FormattedSummary};
use crate::schedule::group_by_year;
use crate::types::{
    with_metadata, BlendedLoanInput, ComputationOutput, LoanComparison, LoanInput, LoanRequest,
    LoanSummary, PeriodEntry, RepaymentStyle, YearGroup,
};
use crate::HouseLoanResult;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// A value sent either as a JSON document inside a string or inline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Encoded<T> {
    Text(String),
    Inline(T),
}

impl<T: DeserializeOwned + Clone> Encoded<T> {
    pub fn decode(&self, field: &str) -> HouseLoanResult<T> {
        match self {
            Encoded::Text(json) => serde_json::from_str(json)
                .map_err(|e| HouseLoanError::MalformedPayload(format!("{field}: {e}"))),
            Encoded::Inline(value) => Ok(value.clone()),
        }
    }
}

/// One loan as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanFields {
    pub total: Decimal,
    pub rate: Decimal,
    pub months: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<RepaymentStyle>,
}

impl LoanFields {
    /// Typed loan; `style` falls back to the enclosing payload's style.
    pub fn to_input(&self, fallback_style: RepaymentStyle) -> HouseLoanResult<LoanInput> {
        let months = whole_months(self.months)?;
        Ok(LoanInput {
            total: self.total,
            rate: self.rate,
            months,
            style: self.style.unwrap_or(fallback_style),
        })
    }
}

/// Summary request payload: a single loan, or a blended loan when `mixture`
/// is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanPayload {
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub mixture: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub months: Option<Decimal>,
    #[serde(default)]
    pub style: RepaymentStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub found_loan: Option<Encoded<LoanFields>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_loan: Option<Encoded<LoanFields>>,
}

/// Detail request payload: the loan payload (usually JSON-encoded) plus the
/// convention whose schedule should be returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailPayload {
    pub options: Encoded<LoanPayload>,
    #[serde(default)]
    pub tab_value: RepaymentStyle,
}

/// Accepts `true`/`false` or the strings `"true"`/`"false"`.
fn deserialize_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Text(s) => s.trim().eq_ignore_ascii_case("true"),
    })
}

fn whole_months(months: Decimal) -> HouseLoanResult<u32> {
    if !months.fract().is_zero() {
        return Err(HouseLoanError::InvalidInput {
            field: "months".into(),
            reason: format!("Loan term must be a whole number of months, got {months}"),
        });
    }
    months.to_u32().ok_or_else(|| HouseLoanError::InvalidInput {
        field: "months".into(),
        reason: format!("Loan term out of range: {months}"),
    })
}

fn required(value: Option<Decimal>, field: &str) -> HouseLoanResult<Decimal> {
    value.ok_or_else(|| HouseLoanError::MalformedPayload(format!("missing field '{field}'")))
}

fn sub_loan(
    encoded: Option<&Encoded<LoanFields>>,
    field: &str,
    style: RepaymentStyle,
) -> HouseLoanResult<LoanInput> {
    encoded
        .ok_or_else(|| {
            HouseLoanError::MalformedPayload(format!("blended loan is missing '{field}'"))
        })?
        .decode(field)?
        .to_input(style)
}

/// Parse a top-level payload document.
pub fn parse_payload<T: DeserializeOwned>(json: &str) -> HouseLoanResult<T> {
    serde_json::from_str(json).map_err(|e| HouseLoanError::MalformedPayload(e.to_string()))
}

// ---------------------------------------------------------------------------
// Pipeline stages
// ---------------------------------------------------------------------------

/// Decode a wire payload into a typed request.
pub fn decode_request(payload: &LoanPayload) -> HouseLoanResult<LoanRequest> {
    if payload.mixture {
        let found_loan = sub_loan(payload.found_loan.as_ref(), "foundLoan", payload.style)?;
        let business_loan =
            sub_loan(payload.business_loan.as_ref(), "businessLoan", payload.style)?;
        return Ok(LoanRequest::Blended(BlendedLoanInput {
            found_loan,
            business_loan,
            style: payload.style,
        }));
    }

    let fields = LoanFields {
        total: required(payload.total, "total")?,
        rate: required(payload.rate, "rate")?,
        months: required(payload.months, "months")?,
        style: Some(payload.style),
    };
    Ok(LoanRequest::Single(fields.to_input(payload.style)?))
}

/// Summaries of both conventions, merged for blended loans.
pub fn compute_summaries(request: &LoanRequest) -> HouseLoanResult<LoanComparison<LoanSummary>> {
    match request {
        LoanRequest::Single(loan) => Ok(LoanComparison {
            equal_payment: amortization::summarize(loan, RepaymentStyle::EqualPayment)?,
            equal_principal: amortization::summarize(loan, RepaymentStyle::EqualPrincipal)?,
        }),
        LoanRequest::Blended(input) => blend::blended_summaries(input),
    }
}

/// Schedule of one convention, merged for blended loans.
pub fn compute_schedule(
    request: &LoanRequest,
    style: RepaymentStyle,
) -> HouseLoanResult<Vec<PeriodEntry>> {
    match request {
        LoanRequest::Single(loan) => amortization::schedule(loan, style),
        LoanRequest::Blended(input) => blend::blended_schedule(input, style),
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Summary request: formatted summaries for both conventions, keyed `"0"`
/// (equal payment) and `"1"` (equal principal) on the wire.
pub fn loan(payload: &LoanPayload) -> HouseLoanResult<LoanComparison<FormattedSummary>> {
    let request = decode_request(payload)?;
    debug!("loan summary request decoded: {request:?}");

    let summaries = compute_summaries(&request)?;
    Ok(summaries.map(|summary| format_summary(&summary)))
}

/// Detail request: the selected convention's formatted schedule grouped by
/// loan year.
pub fn loan_detail(payload: &DetailPayload) -> HouseLoanResult<Vec<YearGroup<FormattedPeriod>>> {
    let options = payload.options.decode("options")?;
    let request = decode_request(&options)?;
    debug!(
        "loan detail request decoded for {}: {request:?}",
        payload.tab_value
    );

    let periods = compute_schedule(&request, payload.tab_value)?;
    Ok(group_by_year(format_schedule(&periods)))
}

fn zero_rate_warnings(request: &LoanRequest) -> Vec<String> {
    let loans: Vec<(&str, &LoanInput)> = match request {
        LoanRequest::Single(loan) => vec![("loan", loan)],
        LoanRequest::Blended(input) => vec![
            ("foundLoan", &input.found_loan),
            ("businessLoan", &input.business_loan),
        ],
    };

    loans
        .into_iter()
        .filter(|(_, loan)| loan.rate.is_zero())
        .map(|(name, _)| {
            format!("{name}: zero interest rate; equal-payment instalments repay principal only")
        })
        .collect()
}

/// Unformatted summaries of both conventions in the standard computation
/// envelope.
pub fn analyze_loan(
    request: &LoanRequest,
) -> HouseLoanResult<ComputationOutput<LoanComparison<LoanSummary>>> {
    let start = Instant::now();

    let summaries = compute_summaries(request)?;
    let warnings = zero_rate_warnings(request);
    for w in &warnings {
        warn!("{w}");
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Mortgage amortization: equal payment vs equal principal",
        &serde_json::json!({
            "request": request,
            "preferred_style": request.style().code(),
            "month_rate": "annual rate / 100 / 12",
            "principal_units": "total * 10000",
        }),
        warnings,
        elapsed,
        summaries,
    ))
}
