//! Batch schedule generation across a tape of loans.
//!
//! Each loan's pipeline reads only its own terms and writes only its own
//! entry sequence, so generation fans out one task per loan. Results are
//! joined before consolidation; a loan that fails (for example with
//! `NonConvergentSchedule`) is reported alongside the others' schedules
//! instead of aborting the batch.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use chrono::NaiveDate;

use crate::aggregate::consolidate::consolidate;
use crate::error::LoanTapeError;
use crate::schedule::engine::generate_schedule;
use crate::tape::LoanTerms;
use crate::types::{ConsolidatedEntry, ScheduleEntry};
use crate::LoanTapeResult;

/// Consolidated view over the loans that generated, plus per-loan failures
/// keyed by input position.
#[derive(Debug)]
pub struct BatchOutcome {
    pub consolidated: Vec<ConsolidatedEntry>,
    pub failures: Vec<(usize, LoanTapeError)>,
}

/// Generate every loan's schedule, one task per loan.
///
/// Output order matches input order regardless of task completion order.
pub fn generate_batch(loans: &[LoanTerms]) -> Vec<LoanTapeResult<Vec<ScheduleEntry>>> {
    #[cfg(feature = "parallel")]
    {
        loans.par_iter().map(generate_schedule).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        loans.iter().map(generate_schedule).collect()
    }
}

/// Generate and consolidate a whole tape in one step.
pub fn consolidate_batch(loans: &[LoanTerms], on_date: Option<NaiveDate>) -> BatchOutcome {
    let mut schedules = Vec::with_capacity(loans.len());
    let mut failures = Vec::new();

    for (index, result) in generate_batch(loans).into_iter().enumerate() {
        match result {
            Ok(schedule) => schedules.push(schedule),
            Err(e) => failures.push((index, e)),
        }
    }

    BatchOutcome {
        consolidated: consolidate(&schedules, on_date),
        failures,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::{CompoundingFrequency, PaymentFrequency};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn loan(number: u64, principal: Decimal) -> LoanTerms {
        LoanTerms {
            loan_number: Some(number),
            principal,
            annual_rate: dec!(0.05),
            term_periods: 36,
            payment_frequency: PaymentFrequency::Monthly,
            compounding_frequency: CompoundingFrequency::Monthly,
            cpr: dec!(0.02),
            start_date: NaiveDate::from_ymd_opt(2023, 1, 13).unwrap(),
            renewal_periods: None,
        }
    }

    #[test]
    fn test_batch_matches_sequential() {
        let loans: Vec<_> = (0..8).map(|i| loan(i, dec!(10_000) + Decimal::from(i))).collect();
        let batch = generate_batch(&loans);

        for (terms, result) in loans.iter().zip(&batch) {
            let sequential = generate_schedule(terms).unwrap();
            assert_eq!(result.as_ref().unwrap(), &sequential);
        }
    }

    #[test]
    fn test_one_bad_loan_does_not_abort_batch() {
        let mut bad = loan(99, dec!(10_000));
        bad.payment_frequency = PaymentFrequency::Quarterly; // no step rule
        let loans = vec![loan(1, dec!(10_000)), bad, loan(2, dec!(20_000))];

        let outcome = consolidate_batch(&loans, None);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].0, 1);
        assert!(matches!(
            outcome.failures[0].1,
            LoanTapeError::InvalidInterval { .. }
        ));
        assert!(!outcome.consolidated.is_empty());

        // The surviving loans' first period still sums both payments.
        let first_due = outcome
            .consolidated
            .iter()
            .find(|r| r.payment > Decimal::ZERO)
            .unwrap();
        let a = generate_schedule(&loans[0]).unwrap();
        let c = generate_schedule(&loans[2]).unwrap();
        assert_eq!(first_due.payment, a[1].payment + c[1].payment);
    }

    #[test]
    fn test_consolidate_batch_with_date_filter() {
        let loans = vec![loan(1, dec!(10_000)), loan(2, dec!(5_000))];
        let schedule = generate_schedule(&loans[0]).unwrap();
        let target = schedule[2].date;

        let outcome = consolidate_batch(&loans, Some(target));
        assert_eq!(outcome.consolidated.len(), 1);
        assert_eq!(outcome.consolidated[0].date, target);
        assert!(outcome.failures.is_empty());
    }
}
