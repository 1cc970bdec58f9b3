mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::schedule::{DailyArgs, MonthlyArgs, ScheduleArgs};
use commands::tape::{ConsolidateArgs, ExportArgs};

/// Loan amortization schedules with decimal precision
#[derive(Parser)]
#[command(
    name = "ltape",
    version,
    about = "Loan amortization schedules with decimal precision",
    long_about = "A CLI for generating loan amortization schedules with decimal \
                  precision. Supports periodic, daily and forced-monthly views, \
                  CPR prepayment assumptions, renewal/balloon terms, and \
                  consolidation across a tape of loans."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the periodic amortization schedule for one loan
    Schedule(ScheduleArgs),
    /// Expand a loan's renewal window into one row per calendar day
    Daily(DailyArgs),
    /// Re-run a loan at monthly cadence regardless of its native one
    Monthly(MonthlyArgs),
    /// Consolidate a tape of loans into one date-indexed view
    Consolidate(ConsolidateArgs),
    /// Write periodic/daily/monthly CSV sections for one tape loan
    Export(ExportArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Schedule(args) => commands::schedule::run_schedule(args),
        Commands::Daily(args) => commands::schedule::run_daily(args),
        Commands::Monthly(args) => commands::schedule::run_monthly(args),
        Commands::Consolidate(args) => commands::tape::run_consolidate(args),
        Commands::Export(args) => commands::tape::run_export(args),
        Commands::Version => {
            println!("ltape {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
