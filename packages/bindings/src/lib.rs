use napi::Result as NapiResult;
use napi_derive::napi;

use house_loan_core::payload::{self, DetailPayload, LoanPayload};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Summaries for both conventions, keyed "0" (equal payment) and "1"
/// (equal principal).
#[napi]
pub fn loan(payload_json: String) -> NapiResult<String> {
    let input: LoanPayload = payload::parse_payload(&payload_json).map_err(to_napi_error)?;
    let output = payload::loan(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Schedule for the convention selected by `tabValue`, grouped by loan year.
#[napi]
pub fn loan_detail(payload_json: String) -> NapiResult<String> {
    let input: DetailPayload = payload::parse_payload(&payload_json).map_err(to_napi_error)?;
    let output = payload::loan_detail(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn analyze_loan(payload_json: String) -> NapiResult<String> {
    let input: LoanPayload = payload::parse_payload(&payload_json).map_err(to_napi_error)?;
    let request = payload::decode_request(&input).map_err(to_napi_error)?;
    let output = payload::analyze_loan(&request).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
