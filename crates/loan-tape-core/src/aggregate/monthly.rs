//! Forced-monthly re-expression of a loan's schedule.

use crate::frequency::PaymentFrequency;
use crate::schedule::engine::generate_schedule;
use crate::tape::LoanTerms;
use crate::types::ScheduleEntry;
use crate::LoanTapeResult;

/// Convert a payment-period count into months, rounding half-up with a floor
/// of one month. Exact for month-multiple cadences.
fn months_from_periods(periods: u32, frequency: PaymentFrequency) -> u32 {
    let ppy = frequency.periods_per_year();
    ((periods * 12 + ppy / 2) / ppy).max(1)
}

/// The same loan re-expressed at monthly cadence, whatever its native one.
pub fn monthly_terms(terms: &LoanTerms) -> LoanTerms {
    let native = terms.payment_frequency;
    LoanTerms {
        term_periods: months_from_periods(terms.term_periods, native),
        renewal_periods: terms
            .renewal_periods
            .map(|r| months_from_periods(r, native)),
        payment_frequency: PaymentFrequency::Monthly,
        ..terms.clone()
    }
}

/// Re-run the engine with cadence forced to monthly, producing a comparable
/// monthly-granularity schedule for reporting.
pub fn monthly_schedule(terms: &LoanTerms) -> LoanTapeResult<Vec<ScheduleEntry>> {
    generate_schedule(&monthly_terms(terms))
}
