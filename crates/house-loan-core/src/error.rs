use thiserror::Error;

#[derive(Debug, Error)]
pub enum HouseLoanError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Financial impossibility: {0}")]
    FinancialImpossibility(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for HouseLoanError {
    fn from(e: serde_json::Error) -> Self {
        HouseLoanError::SerializationError(e.to_string())
    }
}
