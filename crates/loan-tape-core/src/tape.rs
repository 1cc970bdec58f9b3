//! Loan record ingestion.
//!
//! Raw tape records arrive from storage or file import in two shapes, matching
//! the upstream samples: a simplified record (flat term in payment periods)
//! and a modified record (month-denominated amortization and mortgage terms).
//! Both are validated here into [`LoanTerms`]; the engine never sees a
//! malformed field.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LoanTapeError;
use crate::frequency::{CompoundingFrequency, PaymentFrequency};
use crate::types::{Money, Rate};
use crate::LoanTapeResult;

/// Validated loan terms. Immutable once a schedule run begins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// External identifier, carried through for reporting. Absent for
    /// modified-sample records, which are addressed positionally.
    pub loan_number: Option<u64>,
    pub principal: Money,
    /// Nominal annual interest rate as a decimal fraction (0.05 = 5%).
    pub annual_rate: Rate,
    /// Term length in payment periods.
    pub term_periods: u32,
    pub payment_frequency: PaymentFrequency,
    pub compounding_frequency: CompoundingFrequency,
    /// Annual conditional prepayment rate, decimal fraction in [0, 1).
    pub cpr: Rate,
    pub start_date: NaiveDate,
    /// Payment periods until mortgage-term maturity, when shorter than the
    /// amortization term. `None` means the loan runs to full amortization.
    pub renewal_periods: Option<u32>,
}

impl LoanTerms {
    /// Period index whose row carries the maturity/renewal balance.
    #[must_use]
    pub fn renewal_period(&self) -> u32 {
        self.renewal_periods.unwrap_or(self.term_periods)
    }
}

/// Raw simplified-sample record as uploaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanRecord {
    pub loan_number: u64,
    pub loan_amount: Decimal,
    pub interest_rate: Decimal,
    pub start_date: NaiveDate,
    pub term: u32,
    pub payment_frequency: String,
    pub cpr: Decimal,
}

/// Raw modified-sample record as uploaded. Terms are month-denominated and a
/// mortgage term shorter than the amortization term produces a renewal
/// (balloon) balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanTapeRecord {
    pub start_date: NaiveDate,
    pub original_principal: Decimal,
    pub amortization_term_months: u32,
    pub mortgage_term_months: u32,
    pub interest_rate: Decimal,
    #[serde(default)]
    pub compounding_frequency: Option<String>,
    pub payment_frequency: String,
    pub cpr: Decimal,
}

fn invalid(field: &str, reason: &str) -> LoanTapeError {
    LoanTapeError::DataValidation {
        field: field.into(),
        reason: reason.into(),
    }
}

fn validate_common(principal: Money, rate: Rate, cpr: Rate) -> LoanTapeResult<()> {
    if principal <= Decimal::ZERO {
        return Err(invalid("principal", "must be positive"));
    }
    if rate < Decimal::ZERO {
        return Err(invalid("interest_rate", "cannot be negative"));
    }
    if cpr < Decimal::ZERO || cpr >= Decimal::ONE {
        return Err(invalid("cpr", "must be in [0, 1)"));
    }
    Ok(())
}

/// Convert a month count into payment periods at the given cadence,
/// rounding half-up with a floor of one period.
pub fn periods_from_months(months: u32, frequency: PaymentFrequency) -> u32 {
    let ppy = frequency.periods_per_year();
    ((months * ppy + 6) / 12).max(1)
}

impl TryFrom<&LoanRecord> for LoanTerms {
    type Error = LoanTapeError;

    /// Simplified records carry no compounding cadence; the upstream sample
    /// always works the nominal rate on a monthly basis, so Monthly is the
    /// fixed default here.
    fn try_from(record: &LoanRecord) -> Result<Self, Self::Error> {
        validate_common(record.loan_amount, record.interest_rate, record.cpr)?;
        if record.term == 0 {
            return Err(invalid("term", "must be greater than zero"));
        }

        let payment_frequency: PaymentFrequency = record.payment_frequency.parse()?;

        Ok(LoanTerms {
            loan_number: Some(record.loan_number),
            principal: record.loan_amount,
            annual_rate: record.interest_rate,
            term_periods: record.term,
            payment_frequency,
            compounding_frequency: CompoundingFrequency::Monthly,
            cpr: record.cpr,
            start_date: record.start_date,
            renewal_periods: None,
        })
    }
}

impl TryFrom<&LoanTapeRecord> for LoanTerms {
    type Error = LoanTapeError;

    fn try_from(record: &LoanTapeRecord) -> Result<Self, Self::Error> {
        validate_common(record.original_principal, record.interest_rate, record.cpr)?;
        if record.amortization_term_months == 0 {
            return Err(invalid("amortization_term_months", "must be greater than zero"));
        }
        if record.mortgage_term_months == 0 {
            return Err(invalid("mortgage_term_months", "must be greater than zero"));
        }
        if record.mortgage_term_months > record.amortization_term_months {
            return Err(invalid(
                "mortgage_term_months",
                "cannot exceed the amortization term",
            ));
        }

        let payment_frequency: PaymentFrequency = record.payment_frequency.parse()?;
        let compounding_frequency = match &record.compounding_frequency {
            Some(name) => name.parse()?,
            None => CompoundingFrequency::Monthly,
        };

        let term_periods = periods_from_months(record.amortization_term_months, payment_frequency);
        let renewal_periods = periods_from_months(record.mortgage_term_months, payment_frequency);

        Ok(LoanTerms {
            loan_number: None,
            principal: record.original_principal,
            annual_rate: record.interest_rate,
            term_periods,
            payment_frequency,
            compounding_frequency,
            cpr: record.cpr,
            start_date: record.start_date,
            renewal_periods: (renewal_periods < term_periods).then_some(renewal_periods),
        })
    }
}
