pub mod aggregate;
pub mod calendar;
pub mod error;
pub mod frequency;
pub mod schedule;
pub mod tape;
pub mod types;

pub use error::LoanTapeError;
pub use frequency::{CompoundingFrequency, PaymentFrequency};
pub use tape::{LoanRecord, LoanTapeRecord, LoanTerms};
pub use types::*;

/// Standard result type for all loan-tape operations
pub type LoanTapeResult<T> = Result<T, LoanTapeError>;
