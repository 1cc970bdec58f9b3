use chrono::NaiveDate;
use clap::Args;
use serde_json::{json, Value};
use std::path::Path;

use loan_tape_core::aggregate::{consolidate_batch, daily_schedule, monthly_schedule};
use loan_tape_core::schedule::schedule_to_renewal;
use loan_tape_core::{LoanRecord, LoanTapeRecord, LoanTerms};

use crate::input;

/// Arguments for consolidation across a tape of loans
#[derive(Args)]
pub struct ConsolidateArgs {
    /// Path to a JSON or YAML array of loan records
    #[arg(long)]
    pub input: Option<String>,

    /// Treat records as modified-sample tape rows (month-denominated terms)
    #[arg(long)]
    pub modified: bool,

    /// Restrict the output to a single date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

/// Arguments for the periodic/daily/monthly CSV export
#[derive(Args)]
pub struct ExportArgs {
    /// Path to a JSON or YAML array of modified-sample tape rows
    #[arg(long)]
    pub input: String,

    /// 1-based position of the loan within the tape
    #[arg(long)]
    pub loan: usize,

    /// Directory to write the CSV sections into
    #[arg(long, default_value = ".")]
    pub out_dir: String,
}

/// Load a tape file into validated loan terms. Validation failures carry the
/// offending record's position.
fn load_tape(path: &str, modified: bool) -> Result<Vec<LoanTerms>, Box<dyn std::error::Error>> {
    let mut loans = Vec::new();

    if modified {
        let records: Vec<LoanTapeRecord> = input::file::read_input(path)?;
        for (i, record) in records.iter().enumerate() {
            let terms = LoanTerms::try_from(record)
                .map_err(|e| format!("record {}: {}", i + 1, e))?;
            loans.push(terms);
        }
    } else {
        let records: Vec<LoanRecord> = input::file::read_input(path)?;
        for (i, record) in records.iter().enumerate() {
            let terms = LoanTerms::try_from(record)
                .map_err(|e| format!("record {}: {}", i + 1, e))?;
            loans.push(terms);
        }
    }

    Ok(loans)
}

pub fn run_consolidate(args: ConsolidateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loans: Vec<LoanTerms> = if let Some(ref path) = args.input {
        load_tape(path, args.modified)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        let records: Vec<LoanRecord> = serde_json::from_value(data)?;
        records
            .iter()
            .map(LoanTerms::try_from)
            .collect::<Result<_, _>>()?
    } else {
        return Err("--input is required (or pipe records on stdin)".into());
    };

    let outcome = consolidate_batch(&loans, args.date);

    let failures: Vec<String> = outcome
        .failures
        .iter()
        .map(|(i, e)| format!("loan {}: {}", i + 1, e))
        .collect();

    Ok(json!({
        "result": serde_json::to_value(&outcome.consolidated)?,
        "failures": failures,
    }))
}

pub fn run_export(args: ExportArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loans = load_tape(&args.input, true)?;
    let terms = loans
        .get(args.loan.wrapping_sub(1))
        .ok_or_else(|| format!("no loan at position {} (tape has {})", args.loan, loans.len()))?;

    let periodic = schedule_to_renewal(terms)?;
    let daily = daily_schedule(terms)?;
    let monthly = monthly_schedule(terms)?;

    let out_dir = Path::new(&args.out_dir);
    std::fs::create_dir_all(out_dir)?;

    let sections = [
        ("periodic", write_csv(&out_dir.join("periodic.csv"), &periodic)?),
        ("daily", write_csv(&out_dir.join("daily.csv"), &daily)?),
        ("monthly", write_csv(&out_dir.join("monthly.csv"), &monthly)?),
    ];

    Ok(json!({
        "result": {
            "loan": args.loan,
            "out_dir": args.out_dir,
            "sections": sections
                .iter()
                .map(|(name, rows)| json!({"section": name, "rows": rows}))
                .collect::<Vec<_>>(),
        }
    }))
}

fn write_csv<T: serde::Serialize>(
    path: &Path,
    rows: &[T],
) -> Result<usize, Box<dyn std::error::Error>> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| format!("Failed to create '{}': {}", path.display(), e))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(rows.len())
}
