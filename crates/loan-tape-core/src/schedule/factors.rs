//! Derived per-loan factors: periodic rate, level payment, SMM.
//!
//! All derivation runs at full `Decimal` precision. Currency rounding happens
//! only when values are emitted into schedule rows, never here, so rounding
//! error cannot compound across periods.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use serde::{Deserialize, Serialize};

use crate::error::LoanTapeError;
use crate::frequency::{CompoundingFrequency, PaymentFrequency};
use crate::tape::LoanTerms;
use crate::types::{Money, Rate};
use crate::LoanTapeResult;

/// Factors derived from [`LoanTerms`], owned by the run that created them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanFactors {
    /// Payment-period-equivalent of the nominal annual rate.
    pub periodic_rate: Rate,
    /// Fixed payment that amortizes the principal over the full term.
    pub level_payment: Money,
    /// Single-period mortality rate derived from the annual CPR.
    pub smm: Rate,
    /// Period index carrying the maturity/renewal balance.
    pub renewal_period: u32,
    pub month_offset: u32,
    pub day_offset: i64,
}

impl LoanFactors {
    /// Recompute factors deterministically from loan terms.
    pub fn derive(terms: &LoanTerms) -> LoanTapeResult<Self> {
        if terms.term_periods == 0 {
            return Err(LoanTapeError::DataValidation {
                field: "term_periods".into(),
                reason: "must be greater than zero".into(),
            });
        }

        let rate = periodic_rate(
            terms.annual_rate,
            terms.compounding_frequency,
            terms.payment_frequency,
        );

        Ok(LoanFactors {
            periodic_rate: rate,
            level_payment: level_payment(terms.principal, rate, terms.term_periods),
            smm: single_period_mortality(terms.cpr, terms.payment_frequency.periods_per_year()),
            renewal_period: terms.renewal_period(),
            month_offset: terms.payment_frequency.month_offset(),
            day_offset: terms.payment_frequency.day_offset(),
        })
    }
}

/// Payment-period-equivalent rate of a nominal rate compounded at a possibly
/// different cadence: `(1 + nominal/m)^(m/p) - 1`.
///
/// Reproduces `nominal / p` exactly when the two cadences coincide.
pub fn periodic_rate(
    nominal: Rate,
    compounding: CompoundingFrequency,
    payment: PaymentFrequency,
) -> Rate {
    let m = compounding.periods_per_year();
    let p = payment.periods_per_year();

    if m == p {
        return nominal / Decimal::from(p);
    }

    let base = Decimal::ONE + nominal / Decimal::from(m);
    let exponent = Decimal::from(m) / Decimal::from(p);
    base.powd(exponent) - Decimal::ONE
}

/// Fixed-payment annuity amount that retires `principal` over `num_periods`
/// payments at `rate` per period. Zero-rate loans pay `principal / num_periods`
/// exactly.
pub fn level_payment(principal: Money, rate: Rate, num_periods: u32) -> Money {
    if num_periods == 0 {
        return principal;
    }
    if rate.is_zero() {
        return principal / Decimal::from(num_periods);
    }

    let factor = (Decimal::ONE + rate).powd(Decimal::from(num_periods));
    principal * rate * factor / (factor - Decimal::ONE)
}

/// Single-period mortality rate: `1 - (1 - cpr)^(1/periods_per_year)`.
pub fn single_period_mortality(cpr: Rate, periods_per_year: u32) -> Rate {
    if cpr <= Decimal::ZERO || periods_per_year == 0 {
        return Decimal::ZERO;
    }
    if cpr >= Decimal::ONE {
        return Decimal::ONE;
    }

    let exponent = Decimal::ONE / Decimal::from(periods_per_year);
    Decimal::ONE - (Decimal::ONE - cpr).powd(exponent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::{CompoundingFrequency, PaymentFrequency};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal, msg: &str) {
        let diff = (actual - expected).abs();
        assert!(
            diff <= tol,
            "{}: expected ~{}, got {} (diff = {})",
            msg,
            expected,
            actual,
            diff
        );
    }

    #[test]
    fn test_periodic_rate_matching_cadence_is_exact() {
        let rate = periodic_rate(
            dec!(0.05),
            CompoundingFrequency::Monthly,
            PaymentFrequency::Monthly,
        );
        assert_eq!(rate, dec!(0.05) / dec!(12));
    }

    #[test]
    fn test_periodic_rate_semiannual_to_monthly() {
        // (1 + 0.06/2)^(2/12) - 1 ~ 0.0049386
        let rate = periodic_rate(
            dec!(0.06),
            CompoundingFrequency::Semiannual,
            PaymentFrequency::Monthly,
        );
        assert_close(rate, dec!(0.0049386), dec!(0.0000005), "semiannual->monthly");
    }

    #[test]
    fn test_periodic_rate_annual_to_annual() {
        let rate = periodic_rate(
            dec!(0.07),
            CompoundingFrequency::Annually,
            PaymentFrequency::Annually,
        );
        assert_eq!(rate, dec!(0.07));
    }

    #[test]
    fn test_level_payment_thirty_year_benchmark() {
        // 10,000 at 5% over 360 monthly periods -> 53.68/month
        let pmt = level_payment(dec!(10_000), dec!(0.05) / dec!(12), 360);
        assert_close(pmt, dec!(53.68), dec!(0.005), "30y level payment");
    }

    #[test]
    fn test_level_payment_zero_rate() {
        assert_eq!(level_payment(dec!(1200), Decimal::ZERO, 12), dec!(100));
    }

    #[test]
    fn test_level_payment_retires_principal() {
        let principal = dec!(1000);
        let rate = dec!(0.01);
        let pmt = level_payment(principal, rate, 12);

        let mut balance = principal;
        for _ in 0..12 {
            balance -= pmt - balance * rate;
        }
        assert_close(balance, Decimal::ZERO, dec!(0.000001), "annuity retirement");
    }

    #[test]
    fn test_smm_benchmark() {
        // 1 - (1 - 0.0083)^(1/12) ~ 0.000694
        let smm = single_period_mortality(dec!(0.0083), 12);
        assert_close(smm, dec!(0.000694), dec!(0.000001), "SMM from 0.83% CPR");
    }

    #[test]
    fn test_smm_zero_cpr() {
        assert_eq!(single_period_mortality(Decimal::ZERO, 12), Decimal::ZERO);
    }

    #[test]
    fn test_smm_full_cpr_saturates() {
        assert_eq!(single_period_mortality(dec!(1), 12), Decimal::ONE);
    }

    #[test]
    fn test_smm_annualizes_back() {
        let cpr = dec!(0.06);
        let smm = single_period_mortality(cpr, 12);
        let reconstructed = Decimal::ONE - (Decimal::ONE - smm).powd(dec!(12));
        assert_close(reconstructed, cpr, dec!(0.000001), "(1-SMM)^12 round-trip");
    }

    #[test]
    fn test_derive_carries_offsets_and_renewal() {
        let terms = LoanTerms {
            loan_number: Some(1),
            principal: dec!(10_000),
            annual_rate: dec!(0.05),
            term_periods: 360,
            payment_frequency: PaymentFrequency::Monthly,
            compounding_frequency: CompoundingFrequency::Monthly,
            cpr: dec!(0.0083),
            start_date: NaiveDate::from_ymd_opt(2023, 1, 13).unwrap(),
            renewal_periods: Some(12),
        };
        let factors = LoanFactors::derive(&terms).unwrap();
        assert_eq!(factors.renewal_period, 12);
        assert_eq!(factors.month_offset, 1);
        assert_eq!(factors.day_offset, 0);
        assert_close(factors.level_payment, dec!(53.68), dec!(0.005), "derived pmt");
    }
}
