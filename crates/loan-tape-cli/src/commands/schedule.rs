use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_tape_core::aggregate::{daily_schedule, monthly_schedule};
use loan_tape_core::schedule::{analyze_loan, schedule_to_renewal};
use loan_tape_core::{LoanRecord, LoanTerms};

use crate::input;

/// Loan fields shared by the single-loan commands.
#[derive(Args)]
pub struct LoanArgs {
    /// Path to a JSON or YAML loan record (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan number
    #[arg(long)]
    pub loan_number: Option<u64>,

    /// Principal amount
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Nominal annual interest rate as a decimal fraction (0.05 = 5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Term length in payment periods
    #[arg(long)]
    pub term: Option<u32>,

    /// Payment cadence (monthly, semimonthly, biweekly, weekly, ...)
    #[arg(long, default_value = "monthly")]
    pub frequency: String,

    /// Annual conditional prepayment rate as a decimal fraction
    #[arg(long, default_value = "0")]
    pub cpr: Decimal,

    /// Origination date (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
}

/// Arguments for the periodic schedule
#[derive(Args)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Materialize only the renewal window instead of the full term
    #[arg(long)]
    pub renewal_only: bool,
}

/// Arguments for the daily expansion
#[derive(Args)]
pub struct DailyArgs {
    #[command(flatten)]
    pub loan: LoanArgs,
}

/// Arguments for the forced-monthly re-run
#[derive(Args)]
pub struct MonthlyArgs {
    #[command(flatten)]
    pub loan: LoanArgs,
}

/// Resolve loan terms from a file, piped stdin, or individual flags.
fn resolve_terms(args: &LoanArgs) -> Result<LoanTerms, Box<dyn std::error::Error>> {
    let record: LoanRecord = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        LoanRecord {
            loan_number: args.loan_number.unwrap_or(0),
            loan_amount: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            interest_rate: args.rate.ok_or("--rate is required (or provide --input)")?,
            start_date: args
                .start_date
                .ok_or("--start-date is required (or provide --input)")?,
            term: args.term.ok_or("--term is required (or provide --input)")?,
            payment_frequency: args.frequency.clone(),
            cpr: args.cpr,
        }
    };

    Ok(LoanTerms::try_from(&record)?)
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = resolve_terms(&args.loan)?;

    if args.renewal_only {
        let entries = schedule_to_renewal(&terms)?;
        return Ok(serde_json::to_value(entries)?);
    }

    let output = analyze_loan(&terms)?;
    Ok(serde_json::to_value(output)?)
}

pub fn run_daily(args: DailyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = resolve_terms(&args.loan)?;
    let entries = daily_schedule(&terms)?;
    Ok(serde_json::to_value(entries)?)
}

pub fn run_monthly(args: MonthlyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = resolve_terms(&args.loan)?;
    let entries = monthly_schedule(&terms)?;
    Ok(serde_json::to_value(entries)?)
}
