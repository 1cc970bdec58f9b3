pub mod engine;
pub mod factors;

pub use engine::{analyze_loan, generate_schedule, schedule_to_renewal, ScheduleOutput};
pub use factors::LoanFactors;
