pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// The documented column order for schedule rows. serde_json maps sort keys
/// alphabetically, so array formatters restore this order when the row shape
/// matches; unknown shapes fall back to key order.
const SCHEDULE_COLUMNS: &[&str] = &[
    "period",
    "day",
    "year_month",
    "date",
    "opening_balance",
    "principal_remaining",
    "payment",
    "interest",
    "prepayment",
    "principal",
    "closing_balance",
    "maturity",
    "kind",
];

/// Headers for an array of row objects, in documented column order where the
/// keys are recognized schedule columns.
pub fn row_headers(first: &serde_json::Map<String, Value>) -> Vec<String> {
    let known: Vec<String> = SCHEDULE_COLUMNS
        .iter()
        .filter(|c| first.contains_key(**c))
        .map(|c| c.to_string())
        .collect();

    if known.len() == first.len() {
        known
    } else {
        first.keys().cloned().collect()
    }
}
