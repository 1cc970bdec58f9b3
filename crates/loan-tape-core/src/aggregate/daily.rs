//! Daily expansion of a periodic schedule.
//!
//! Each periodic row is spread over every calendar day of its covering month.
//! Cash flows post only on the last enumerated day, and they post the *next*
//! row's values: row `i`'s last day shows row `i + 1`'s payment, interest,
//! principal, prepayment and closing balance, with the final row repeating
//! itself. This look-ahead indexing is inherited behavior and is reproduced
//! exactly; see the note in the test module.

use chrono::{Datelike, Duration, Months, NaiveDate};
use rust_decimal::Decimal;

use crate::error::LoanTapeError;
use crate::schedule::engine::schedule_to_renewal;
use crate::tape::LoanTerms;
use crate::types::{DailyScheduleEntry, ScheduleEntry};
use crate::LoanTapeResult;

/// Number of days in the calendar month containing `date`.
fn days_in_month(date: NaiveDate) -> LoanTapeResult<i64> {
    let overflow = || LoanTapeError::DateOverflow {
        from: date.to_string(),
        step: "monthly".into(),
    };
    let first = date.with_day(1).ok_or_else(overflow)?;
    let next = first.checked_add_months(Months::new(1)).ok_or_else(overflow)?;
    Ok((next - first).num_days())
}

/// Expand a periodic schedule into one row per calendar day.
pub fn expand_daily(periodic: &[ScheduleEntry]) -> LoanTapeResult<Vec<DailyScheduleEntry>> {
    if periodic.is_empty() {
        return Ok(Vec::new());
    }

    let mut rows = Vec::new();
    let mut cursor = periodic[0].date;

    for (idx, entry) in periodic.iter().enumerate() {
        let span = days_in_month(cursor)?;
        let mut opening = entry.opening_balance;
        let mut last_date = cursor;

        for day in 0..span {
            let date = cursor
                .checked_add_signed(Duration::days(day))
                .ok_or_else(|| LoanTapeError::DateOverflow {
                    from: cursor.to_string(),
                    step: "daily".into(),
                })?;
            last_date = date;
            let is_last = day == span - 1;

            // The row's own closing, before any look-ahead replacement. Only
            // the maturity column sees this value on the last day.
            let own_closing = if is_last {
                opening - (entry.principal + entry.prepayment)
            } else if day == 0 {
                entry.closing_balance
            } else {
                opening
            };
            let maturity = if own_closing > Decimal::ZERO {
                own_closing
            } else {
                Decimal::ZERO
            };

            let source = if is_last {
                &periodic[(idx + 1).min(periodic.len() - 1)]
            } else {
                entry
            };
            let closing = if is_last { source.closing_balance } else { own_closing };

            rows.push(DailyScheduleEntry {
                period: entry.period,
                day: day as u32,
                year_month: date.format("%Y-%m").to_string(),
                date,
                opening_balance: opening,
                payment: if is_last { source.payment } else { Decimal::ZERO },
                interest: if is_last { source.interest } else { Decimal::ZERO },
                principal: if is_last { source.principal } else { Decimal::ZERO },
                prepayment: if is_last { source.prepayment } else { Decimal::ZERO },
                maturity,
                closing_balance: closing,
            });

            opening = closing;
        }

        cursor = last_date
            .checked_add_signed(Duration::days(1))
            .ok_or_else(|| LoanTapeError::DateOverflow {
                from: last_date.to_string(),
                step: "daily".into(),
            })?;
    }

    Ok(rows)
}

/// Daily expansion of a loan's renewal window.
pub fn daily_schedule(terms: &LoanTerms) -> LoanTapeResult<Vec<DailyScheduleEntry>> {
    let periodic = schedule_to_renewal(terms)?;
    expand_daily(&periodic)
}
