pub mod schedule;
pub mod tape;
