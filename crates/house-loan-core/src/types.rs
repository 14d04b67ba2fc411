use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::HouseLoanError;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%).
pub type Rate = Decimal;

/// Repayment convention. Wire code `0` is equal payment, `1` is equal principal,
/// for both the `style` and `tabValue` fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RepaymentStyle {
    /// Constant total payment per period (annuity).
    #[default]
    EqualPayment,
    /// Constant principal per period; the payment declines over time.
    EqualPrincipal,
}

impl RepaymentStyle {
    pub fn code(self) -> &'static str {
        match self {
            RepaymentStyle::EqualPayment => "0",
            RepaymentStyle::EqualPrincipal => "1",
        }
    }
}

impl fmt::Display for RepaymentStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepaymentStyle::EqualPayment => write!(f, "equal payment"),
            RepaymentStyle::EqualPrincipal => write!(f, "equal principal"),
        }
    }
}

impl FromStr for RepaymentStyle {
    type Err = HouseLoanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0" => Ok(RepaymentStyle::EqualPayment),
            "1" => Ok(RepaymentStyle::EqualPrincipal),
            other => Err(HouseLoanError::InvalidInput {
                field: "style".into(),
                reason: format!("unknown repayment style code '{other}', expected 0 or 1"),
            }),
        }
    }
}

impl Serialize for RepaymentStyle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for RepaymentStyle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Code {
            Number(u64),
            Text(String),
        }

        let code = match Code::deserialize(deserializer)? {
            Code::Number(n) => n.to_string(),
            Code::Text(s) => s,
        };
        code.parse().map_err(serde::de::Error::custom)
    }
}

/// A single loan as seen by the amortization engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanInput {
    /// Principal in ten-thousand currency units (3 = 30,000).
    pub total: Money,
    /// Annual interest rate as a percentage (3.25 = 3.25%).
    pub rate: Decimal,
    /// Term length in months.
    pub months: u32,
    #[serde(default)]
    pub style: RepaymentStyle,
}

/// Two independently-rated sub-loans sharing one term, reported as a
/// per-period sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlendedLoanInput {
    /// Policy-rate (provident fund) loan.
    pub found_loan: LoanInput,
    /// Market-rate (commercial) loan.
    pub business_loan: LoanInput,
    #[serde(default)]
    pub style: RepaymentStyle,
}

/// A decoded loan request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LoanRequest {
    Single(LoanInput),
    Blended(BlendedLoanInput),
}

impl LoanRequest {
    /// The convention the caller ultimately wants displayed.
    pub fn style(&self) -> RepaymentStyle {
        match self {
            LoanRequest::Single(loan) => loan.style,
            LoanRequest::Blended(blend) => blend.style,
        }
    }
}

/// Headline figures for one loan under one convention, in absolute currency units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanSummary {
    pub loan_total: Money,
    /// First-period payment (equal principal) or the level payment (equal payment).
    pub month_payment: Money,
    pub repayment_total: Money,
    pub interest_total: Money,
}

/// One period of an amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodEntry {
    /// 1-based period counter over the whole term.
    pub stage: u32,
    /// Position within a 12-month cycle, wraps back to 1.
    pub month: u32,
    pub interest: Money,
    /// Principal portion of the payment.
    pub capital: Money,
    pub repayment: Money,
    /// Outstanding balance after this period.
    pub surplus: Money,
}

/// Schedule entries bucketed by sequential loan year (not a calendar year).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearGroup<T> {
    pub year: u32,
    pub data: Vec<T>,
}

/// Result of running both repayment conventions over the same loan.
///
/// Serializes under the wire keys `"0"` and `"1"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanComparison<T> {
    #[serde(rename = "0")]
    pub equal_payment: T,
    #[serde(rename = "1")]
    pub equal_principal: T,
}

impl<T> LoanComparison<T> {
    pub fn select(&self, style: RepaymentStyle) -> &T {
        match style {
            RepaymentStyle::EqualPayment => &self.equal_payment,
            RepaymentStyle::EqualPrincipal => &self.equal_principal,
        }
    }

    pub fn into_selected(self, style: RepaymentStyle) -> T {
        match style {
            RepaymentStyle::EqualPayment => self.equal_payment,
            RepaymentStyle::EqualPrincipal => self.equal_principal,
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> LoanComparison<U> {
        LoanComparison {
            equal_payment: f(self.equal_payment),
            equal_principal: f(self.equal_principal),
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
