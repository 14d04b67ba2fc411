use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use house_loan_core::payload::{self, DetailPayload, Encoded, LoanPayload};
use house_loan_core::RepaymentStyle;

use crate::input;

/// Loan description shared by every subcommand
#[derive(Args)]
pub struct LoanArgs {
    /// Path to JSON payload file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan amount in ten-thousands (3 = 30,000)
    #[arg(long)]
    pub total: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 3.25)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan term in months
    #[arg(long)]
    pub months: Option<u32>,

    /// Preferred repayment style: 0 = equal payment, 1 = equal principal
    #[arg(long)]
    pub style: Option<RepaymentStyle>,
}

/// Arguments for the per-period schedule
#[derive(Args)]
pub struct DetailArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Schedule to print: 0 = equal payment, 1 = equal principal
    /// (defaults to the payload's tabValue or style)
    #[arg(long)]
    pub tab: Option<RepaymentStyle>,
}

fn payload_from_flags(args: &LoanArgs) -> Result<LoanPayload, Box<dyn std::error::Error>> {
    let total = args.total.ok_or("--total is required (or provide --input)")?;
    let rate = args.rate.ok_or("--rate is required (or provide --input)")?;
    let months = args.months.ok_or("--months is required (or provide --input)")?;

    Ok(LoanPayload {
        total: Some(total),
        rate: Some(rate),
        months: Some(Decimal::from(months)),
        style: args.style.unwrap_or_default(),
        ..LoanPayload::default()
    })
}

fn load_loan_payload(args: &LoanArgs) -> Result<LoanPayload, Box<dyn std::error::Error>> {
    match input::load(args.input.as_deref())? {
        Some(data) => Ok(serde_json::from_value(data)?),
        None => payload_from_flags(args),
    }
}

fn wrap_detail(options: LoanPayload, tab: Option<RepaymentStyle>) -> DetailPayload {
    DetailPayload {
        tab_value: tab.unwrap_or(options.style),
        options: Encoded::Inline(options),
    }
}

pub fn run_summary(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request = load_loan_payload(&args)?;
    let result = payload::loan(&request)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_detail(args: DetailArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request = match input::load(args.loan.input.as_deref())? {
        Some(data) if data.get("options").is_some() => {
            let mut detail: DetailPayload = serde_json::from_value(data)?;
            if let Some(tab) = args.tab {
                detail.tab_value = tab;
            }
            detail
        }
        Some(data) => wrap_detail(serde_json::from_value(data)?, args.tab),
        None => wrap_detail(payload_from_flags(&args.loan)?, args.tab),
    };

    let result = payload::loan_detail(&request)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_analyze(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request = payload::decode_request(&load_loan_payload(&args)?)?;
    let result = payload::analyze_loan(&request)?;
    Ok(serde_json::to_value(result)?)
}
