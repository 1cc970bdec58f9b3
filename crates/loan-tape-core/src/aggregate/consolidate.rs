//! Cross-loan consolidation: union all entries, group by due date, sum the
//! monetary columns. Grouping is by exact calendar-date equality and the
//! summation is order-independent, so the result does not depend on the order
//! schedules arrive in.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::types::{ConsolidatedEntry, ScheduleEntry};

/// Consolidate any number of loans' schedules into one date-indexed view.
/// `on_date` restricts the output to a single date.
pub fn consolidate(
    schedules: &[Vec<ScheduleEntry>],
    on_date: Option<NaiveDate>,
) -> Vec<ConsolidatedEntry> {
    let mut by_date: BTreeMap<NaiveDate, ConsolidatedEntry> = BTreeMap::new();

    for schedule in schedules {
        for entry in schedule {
            let row = by_date
                .entry(entry.date)
                .or_insert_with(|| ConsolidatedEntry {
                    date: entry.date,
                    principal_remaining: Decimal::ZERO,
                    payment: Decimal::ZERO,
                    prepayment: Decimal::ZERO,
                    interest: Decimal::ZERO,
                    principal: Decimal::ZERO,
                    closing_balance: Decimal::ZERO,
                });
            row.principal_remaining += entry.opening_balance;
            row.payment += entry.payment;
            row.prepayment += entry.prepayment;
            row.interest += entry.interest;
            row.principal += entry.principal;
            row.closing_balance += entry.closing_balance;
        }
    }

    by_date
        .into_values()
        .filter(|row| on_date.map_or(true, |d| row.date == d))
        .collect()
}
