pub mod amortization;
pub mod blend;
pub mod error;
pub mod format;
pub mod payload;
pub mod schedule;
pub mod types;

pub use error::HouseLoanError;
pub use types::*;

/// Standard result type for all house-loan operations
pub type HouseLoanResult<T> = Result<T, HouseLoanError>;
