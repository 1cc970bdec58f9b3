use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoanTapeError {
    #[error("Invalid frequency: '{name}' is not a recognized cadence")]
    InvalidFrequency { name: String },

    #[error("Invalid interval: cadence '{cadence}' has no date-step rule")]
    InvalidInterval { cadence: String },

    #[error("Invalid loan record: {field} — {reason}")]
    DataValidation { field: String, reason: String },

    #[error("Non-convergent schedule: balance {balance} still outstanding and non-decreasing at period {period} (payment does not cover interest)")]
    NonConvergentSchedule { period: u32, balance: Decimal },

    #[error("Date overflow stepping from {from} by {step}")]
    DateOverflow { from: String, step: String },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for LoanTapeError {
    fn from(e: serde_json::Error) -> Self {
        LoanTapeError::Serialization(e.to_string())
    }
}
