use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Currency precision: 2 decimal places, applied only when a value is
/// emitted into a schedule row.
pub const CURRENCY_DP: u32 = 2;

/// Round to currency precision at the emission boundary.
pub fn to_currency(value: Decimal) -> Money {
    value.round_dp(CURRENCY_DP)
}

/// Discriminant for a single amortization period.
///
/// `FinalPartial` marks the period whose payment was capped below the level
/// payment to avoid overshooting payoff. Prepayment never accrues on a
/// `FinalPartial` period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodKind {
    Regular,
    FinalPartial,
}

/// One row of a periodic amortization schedule.
///
/// Period 0 is the origination anchor: zero monetary fields, closing balance
/// equal to the principal. Monetary fields are rounded to currency precision;
/// the engine carries its running balance at full precision internally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Period index; 0 = origination, strictly increasing by 1.
    pub period: u32,
    /// Payment due date for this period.
    pub date: NaiveDate,
    /// Balance outstanding before this period's payment.
    pub opening_balance: Money,
    /// Scheduled payment, capped so it never exceeds opening balance + interest.
    pub payment: Money,
    /// Interest portion of the payment.
    pub interest: Money,
    /// Voluntary prepayment applied this period (SMM on the opening balance).
    pub prepayment: Money,
    /// Scheduled principal portion of the payment.
    pub principal: Money,
    /// Balance outstanding after this period's payment.
    pub closing_balance: Money,
    /// Non-zero only at the renewal-period row: the payoff/renewal balance.
    pub maturity: Money,
    pub kind: PeriodKind,
}

/// One row of a daily-expanded schedule.
///
/// Monetary flows post only on the last enumerated day of each period's
/// covering month; balances carry forward day-to-day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyScheduleEntry {
    /// Periodic-schedule row this day belongs to.
    pub period: u32,
    /// Zero-based day offset within the covering month.
    pub day: u32,
    /// Calendar month key, `YYYY-MM`.
    pub year_month: String,
    pub date: NaiveDate,
    pub opening_balance: Money,
    pub payment: Money,
    pub interest: Money,
    pub principal: Money,
    pub prepayment: Money,
    pub maturity: Money,
    pub closing_balance: Money,
}

/// One row of a consolidated (cross-loan, date-grouped) view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsolidatedEntry {
    pub date: NaiveDate,
    /// Sum of opening balances across loans due on this date.
    pub principal_remaining: Money,
    pub payment: Money,
    pub prepayment: Money,
    pub interest: Money,
    pub principal: Money,
    pub closing_balance: Money,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
