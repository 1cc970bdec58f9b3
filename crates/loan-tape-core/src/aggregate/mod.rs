//! Derived views over engine-produced schedules: daily expansion,
//! forced-monthly re-run, cross-loan consolidation, batch generation.

pub mod batch;
pub mod consolidate;
pub mod daily;
pub mod monthly;

pub use batch::{consolidate_batch, generate_batch, BatchOutcome};
pub use consolidate::consolidate;
pub use daily::{daily_schedule, expand_daily};
pub use monthly::{monthly_schedule, monthly_terms};
