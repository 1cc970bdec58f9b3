//! Payment and compounding cadence types.
//!
//! Cadence names arriving from loan records are parsed once at the boundary;
//! everything past that point works on these closed enums.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LoanTapeError;

/// Payment cadence of a loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentFrequency {
    Annually,
    Semiannually,
    Quarterly,
    Bimonthly,
    #[default]
    Monthly,
    Semimonthly,
    Biweekly,
    Weekly,
}

impl PaymentFrequency {
    /// Number of payment periods per year.
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            PaymentFrequency::Annually => 1,
            PaymentFrequency::Semiannually => 2,
            PaymentFrequency::Quarterly => 4,
            PaymentFrequency::Bimonthly => 6,
            PaymentFrequency::Monthly => 12,
            PaymentFrequency::Semimonthly => 24,
            PaymentFrequency::Biweekly => 26,
            PaymentFrequency::Weekly => 52,
        }
    }

    /// Whole months between consecutive payments; 0 for sub-monthly cadences.
    #[must_use]
    pub fn month_offset(&self) -> u32 {
        match self {
            PaymentFrequency::Annually => 12,
            PaymentFrequency::Semiannually => 6,
            PaymentFrequency::Quarterly => 3,
            PaymentFrequency::Bimonthly => 2,
            PaymentFrequency::Monthly => 1,
            PaymentFrequency::Semimonthly
            | PaymentFrequency::Biweekly
            | PaymentFrequency::Weekly => 0,
        }
    }

    /// Days between consecutive payments for sub-monthly cadences; 0 otherwise.
    #[must_use]
    pub fn day_offset(&self) -> i64 {
        match self {
            PaymentFrequency::Semimonthly => 15,
            PaymentFrequency::Biweekly => 14,
            PaymentFrequency::Weekly => 7,
            _ => 0,
        }
    }
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PaymentFrequency::Annually => "annually",
            PaymentFrequency::Semiannually => "semiannually",
            PaymentFrequency::Quarterly => "quarterly",
            PaymentFrequency::Bimonthly => "bimonthly",
            PaymentFrequency::Monthly => "monthly",
            PaymentFrequency::Semimonthly => "semimonthly",
            PaymentFrequency::Biweekly => "biweekly",
            PaymentFrequency::Weekly => "weekly",
        };
        write!(f, "{name}")
    }
}

impl FromStr for PaymentFrequency {
    type Err = LoanTapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "annually" => Ok(PaymentFrequency::Annually),
            "semiannually" => Ok(PaymentFrequency::Semiannually),
            "quarterly" => Ok(PaymentFrequency::Quarterly),
            "bimonthly" => Ok(PaymentFrequency::Bimonthly),
            "monthly" => Ok(PaymentFrequency::Monthly),
            "semimonthly" => Ok(PaymentFrequency::Semimonthly),
            "biweekly" | "bi-weekly" => Ok(PaymentFrequency::Biweekly),
            "weekly" => Ok(PaymentFrequency::Weekly),
            other => Err(LoanTapeError::InvalidFrequency {
                name: other.to_string(),
            }),
        }
    }
}

/// Compounding cadence of the nominal rate. Narrower set than payment cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CompoundingFrequency {
    Annually,
    Semiannual,
    Quarterly,
    #[default]
    Monthly,
}

impl CompoundingFrequency {
    /// Number of compounding periods per year.
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            CompoundingFrequency::Annually => 1,
            CompoundingFrequency::Semiannual => 2,
            CompoundingFrequency::Quarterly => 4,
            CompoundingFrequency::Monthly => 12,
        }
    }
}

impl fmt::Display for CompoundingFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CompoundingFrequency::Annually => "annually",
            CompoundingFrequency::Semiannual => "semiannual",
            CompoundingFrequency::Quarterly => "quarterly",
            CompoundingFrequency::Monthly => "monthly",
        };
        write!(f, "{name}")
    }
}

impl FromStr for CompoundingFrequency {
    type Err = LoanTapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "annually" => Ok(CompoundingFrequency::Annually),
            "semiannual" => Ok(CompoundingFrequency::Semiannual),
            "quarterly" => Ok(CompoundingFrequency::Quarterly),
            "monthly" => Ok(CompoundingFrequency::Monthly),
            other => Err(LoanTapeError::InvalidFrequency {
                name: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periods_per_year() {
        assert_eq!(PaymentFrequency::Annually.periods_per_year(), 1);
        assert_eq!(PaymentFrequency::Bimonthly.periods_per_year(), 6);
        assert_eq!(PaymentFrequency::Monthly.periods_per_year(), 12);
        assert_eq!(PaymentFrequency::Semimonthly.periods_per_year(), 24);
        assert_eq!(PaymentFrequency::Biweekly.periods_per_year(), 26);
        assert_eq!(PaymentFrequency::Weekly.periods_per_year(), 52);
    }

    #[test]
    fn test_offsets() {
        assert_eq!(PaymentFrequency::Annually.month_offset(), 12);
        assert_eq!(PaymentFrequency::Quarterly.month_offset(), 3);
        assert_eq!(PaymentFrequency::Monthly.month_offset(), 1);
        assert_eq!(PaymentFrequency::Weekly.month_offset(), 0);

        assert_eq!(PaymentFrequency::Monthly.day_offset(), 0);
        assert_eq!(PaymentFrequency::Semimonthly.day_offset(), 15);
        assert_eq!(PaymentFrequency::Biweekly.day_offset(), 14);
        assert_eq!(PaymentFrequency::Weekly.day_offset(), 7);
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(
            "MONTHLY".parse::<PaymentFrequency>().unwrap(),
            PaymentFrequency::Monthly
        );
        assert_eq!(
            "Bi-Weekly".parse::<PaymentFrequency>().unwrap(),
            PaymentFrequency::Biweekly
        );
        assert_eq!(
            "SemiAnnual".parse::<CompoundingFrequency>().unwrap(),
            CompoundingFrequency::Semiannual
        );
    }

    #[test]
    fn test_parse_unknown_name() {
        let err = "fortnightly".parse::<PaymentFrequency>().unwrap_err();
        assert!(matches!(err, LoanTapeError::InvalidFrequency { name } if name == "fortnightly"));
    }

    #[test]
    fn test_compounding_narrower_set() {
        assert!("weekly".parse::<CompoundingFrequency>().is_err());
        assert!("biweekly".parse::<CompoundingFrequency>().is_err());
    }
}
