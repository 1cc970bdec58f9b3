//! Calendar date stepping keyed to payment cadence.

use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LoanTapeError;
use crate::frequency::PaymentFrequency;
use crate::LoanTapeResult;

/// Supported date-step cadences.
///
/// Narrower than [`PaymentFrequency`]: month-multiple cadences beyond monthly
/// have no step rule and fail conversion with `InvalidInterval`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepInterval {
    Daily,
    Weekly,
    Biweekly,
    Semimonthly,
    Monthly,
}

/// Advance a date by one payment interval.
///
/// Monthly steps preserve the day-of-month where valid and clamp to month end
/// otherwise (Jan 31 -> Feb 28). Pure function of its arguments; callers
/// thread the returned date into the next call.
pub fn advance(date: NaiveDate, interval: StepInterval) -> LoanTapeResult<NaiveDate> {
    let stepped = match interval {
        StepInterval::Daily => date.checked_add_signed(Duration::days(1)),
        StepInterval::Weekly => date.checked_add_signed(Duration::weeks(1)),
        StepInterval::Biweekly => date.checked_add_signed(Duration::weeks(2)),
        StepInterval::Semimonthly => date.checked_add_signed(Duration::days(15)),
        StepInterval::Monthly => date.checked_add_months(Months::new(1)),
    };

    stepped.ok_or_else(|| LoanTapeError::DateOverflow {
        from: date.to_string(),
        step: interval.to_string(),
    })
}

impl TryFrom<PaymentFrequency> for StepInterval {
    type Error = LoanTapeError;

    fn try_from(freq: PaymentFrequency) -> Result<Self, Self::Error> {
        match freq {
            PaymentFrequency::Monthly => Ok(StepInterval::Monthly),
            PaymentFrequency::Semimonthly => Ok(StepInterval::Semimonthly),
            PaymentFrequency::Biweekly => Ok(StepInterval::Biweekly),
            PaymentFrequency::Weekly => Ok(StepInterval::Weekly),
            unsupported => Err(LoanTapeError::InvalidInterval {
                cadence: unsupported.to_string(),
            }),
        }
    }
}

impl fmt::Display for StepInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StepInterval::Daily => "daily",
            StepInterval::Weekly => "weekly",
            StepInterval::Biweekly => "bi-weekly",
            StepInterval::Semimonthly => "semi-monthly",
            StepInterval::Monthly => "monthly",
        };
        write!(f, "{name}")
    }
}

impl FromStr for StepInterval {
    type Err = LoanTapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(StepInterval::Daily),
            "weekly" => Ok(StepInterval::Weekly),
            "biweekly" | "bi-weekly" => Ok(StepInterval::Biweekly),
            "semimonthly" | "semi-monthly" => Ok(StepInterval::Semimonthly),
            "monthly" => Ok(StepInterval::Monthly),
            other => Err(LoanTapeError::InvalidInterval {
                cadence: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_advance_daily_weekly() {
        assert_eq!(advance(d(2023, 1, 13), StepInterval::Daily).unwrap(), d(2023, 1, 14));
        assert_eq!(advance(d(2023, 1, 13), StepInterval::Weekly).unwrap(), d(2023, 1, 20));
        assert_eq!(advance(d(2023, 1, 13), StepInterval::Biweekly).unwrap(), d(2023, 1, 27));
    }

    #[test]
    fn test_advance_semimonthly() {
        assert_eq!(
            advance(d(2023, 1, 13), StepInterval::Semimonthly).unwrap(),
            d(2023, 1, 28)
        );
    }

    #[test]
    fn test_advance_monthly_preserves_day() {
        assert_eq!(advance(d(2023, 1, 13), StepInterval::Monthly).unwrap(), d(2023, 2, 13));
    }

    #[test]
    fn test_advance_monthly_clamps_to_month_end() {
        assert_eq!(advance(d(2023, 1, 31), StepInterval::Monthly).unwrap(), d(2023, 2, 28));
        assert_eq!(advance(d(2024, 1, 31), StepInterval::Monthly).unwrap(), d(2024, 2, 29));
    }

    #[test]
    fn test_unsupported_cadence() {
        let err = StepInterval::try_from(PaymentFrequency::Quarterly).unwrap_err();
        assert!(matches!(err, LoanTapeError::InvalidInterval { .. }));
        assert!(StepInterval::try_from(PaymentFrequency::Annually).is_err());
        assert!(StepInterval::try_from(PaymentFrequency::Bimonthly).is_err());
    }

    #[test]
    fn test_parse_interval() {
        assert_eq!("bi-weekly".parse::<StepInterval>().unwrap(), StepInterval::Biweekly);
        assert!("yearly".parse::<StepInterval>().is_err());
    }
}
