//! The period-by-period amortization state machine.
//!
//! State per step is `(period, balance, due date)`. The running balance is
//! carried at full precision; each emitted row is rounded to currency
//! precision. Because consecutive rows round the same internal value, the
//! closing balance of period `n` always equals the opening balance of
//! period `n + 1` exactly.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::calendar::{advance, StepInterval};
use crate::error::LoanTapeError;
use crate::schedule::factors::LoanFactors;
use crate::tape::LoanTerms;
use crate::types::{
    to_currency, with_metadata, ComputationOutput, Money, PeriodKind, ScheduleEntry,
};
use crate::LoanTapeResult;

/// Periodic schedule plus run totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleOutput {
    pub entries: Vec<ScheduleEntry>,
    pub total_interest: Money,
    pub total_prepayment: Money,
    pub total_principal: Money,
    /// Periods actually needed to retire the balance; at most the term.
    pub periods_to_payoff: u32,
}

/// Generate the canonical periodic schedule for a loan.
///
/// Deterministic: identical terms produce identical entry sequences.
pub fn generate_schedule(terms: &LoanTerms) -> LoanTapeResult<Vec<ScheduleEntry>> {
    let factors = LoanFactors::derive(terms)?;
    generate_with_factors(terms, &factors)
}

/// Generate a schedule from pre-derived factors.
pub fn generate_with_factors(
    terms: &LoanTerms,
    factors: &LoanFactors,
) -> LoanTapeResult<Vec<ScheduleEntry>> {
    let interval = StepInterval::try_from(terms.payment_frequency)?;

    let mut entries = Vec::with_capacity(terms.term_periods as usize + 1);

    // Period 0 anchors the opening balance; it carries no cash flow.
    entries.push(ScheduleEntry {
        period: 0,
        date: terms.start_date,
        opening_balance: Decimal::ZERO,
        payment: Decimal::ZERO,
        interest: Decimal::ZERO,
        prepayment: Decimal::ZERO,
        principal: Decimal::ZERO,
        closing_balance: to_currency(terms.principal),
        maturity: Decimal::ZERO,
        kind: PeriodKind::Regular,
    });

    let mut balance = terms.principal;
    let mut due_date = terms.start_date;
    let mut period: u32 = 0;
    let mut stalled: u32 = 0;

    while balance > Decimal::ZERO && period < terms.term_periods {
        let opening = balance;
        let interest = to_currency(opening * factors.periodic_rate);
        due_date = advance(due_date, interval)?;

        // Cap so the final payment never overshoots payoff. A reduced payment
        // marks the terminal partial period: no prepayment accrues on it.
        let uncapped = factors.level_payment;
        let capped = uncapped.min(opening + interest);
        let kind = if capped < uncapped {
            PeriodKind::FinalPartial
        } else {
            PeriodKind::Regular
        };

        let prepayment = match kind {
            PeriodKind::FinalPartial => Decimal::ZERO,
            PeriodKind::Regular => opening * factors.smm,
        };

        let principal_portion = if opening > uncapped {
            capped - interest
        } else {
            opening
        };

        balance = opening - principal_portion - prepayment;
        period += 1;

        if balance > Decimal::ZERO && balance >= opening {
            stalled += 1;
            if stalled >= 2 {
                return Err(LoanTapeError::NonConvergentSchedule {
                    period,
                    balance: to_currency(balance),
                });
            }
        } else {
            stalled = 0;
        }

        let maturity = if period == factors.renewal_period {
            balance
        } else {
            Decimal::ZERO
        };

        entries.push(ScheduleEntry {
            period,
            date: due_date,
            opening_balance: to_currency(opening),
            payment: to_currency(capped),
            interest,
            prepayment: to_currency(prepayment),
            principal: to_currency(principal_portion),
            closing_balance: to_currency(balance),
            maturity: to_currency(maturity),
            kind,
        });
    }

    Ok(entries)
}

/// Materialize only the renewal window: `renewal_period + 1` rows including
/// the period-0 anchor.
pub fn schedule_to_renewal(terms: &LoanTerms) -> LoanTapeResult<Vec<ScheduleEntry>> {
    let factors = LoanFactors::derive(terms)?;
    let mut entries = generate_with_factors(terms, &factors)?;
    entries.truncate(factors.renewal_period as usize + 1);
    Ok(entries)
}

/// Run a full schedule and wrap it with totals and computation metadata.
pub fn analyze_loan(terms: &LoanTerms) -> LoanTapeResult<ComputationOutput<ScheduleOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if terms.cpr > dec!(0.50) {
        warnings.push(format!(
            "CPR of {}% is unusually high",
            terms.cpr * Decimal::from(100)
        ));
    }

    let entries = generate_schedule(terms)?;

    let mut total_interest = Decimal::ZERO;
    let mut total_prepayment = Decimal::ZERO;
    let mut total_principal = Decimal::ZERO;
    for entry in &entries {
        total_interest += entry.interest;
        total_prepayment += entry.prepayment;
        total_principal += entry.principal;
    }

    let output = ScheduleOutput {
        periods_to_payoff: entries.last().map(|e| e.period).unwrap_or(0),
        entries,
        total_interest,
        total_prepayment,
        total_principal,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level-Payment Amortization with Constant CPR Prepayment",
        terms,
        warnings,
        elapsed,
        output,
    ))
}
