use chrono::NaiveDate;
use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::row_headers;

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                print_flat_object(value);
            }
        }
        Value::Array(arr) => {
            print_array_table(arr);
        }
        _ => {
            println!("{}", value);
        }
    }
}

fn print_result_table(result: &Value, envelope: &serde_json::Map<String, Value>) {
    match result {
        // Consolidated views and schedule windows arrive as row arrays.
        Value::Array(rows) => print_array_table(rows),
        Value::Object(res_map) => {
            // A schedule analysis: entry rows plus run totals.
            if let Some(Value::Array(entries)) = res_map.get("entries") {
                print_array_table(entries);
                println!();
                let mut builder = Builder::default();
                builder.push_record(["Field", "Value"]);
                for (key, val) in res_map {
                    if key != "entries" {
                        builder.push_record([key.as_str(), &format_value(val)]);
                    }
                }
                println!("{}", Table::from(builder));
            } else {
                print_flat_object(result);
            }
        }
        _ => print_flat_object(&Value::Object(envelope.clone())),
    }

    if let Some(Value::Array(failures)) = envelope.get("failures") {
        if !failures.is_empty() {
            println!("\nFailures:");
            for f in failures {
                if let Value::String(s) = f {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_flat_object(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        println!("{}", Table::from(builder));
    }
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers = row_headers(first);
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| {
                        map.get(h.as_str())
                            .map(format_value)
                            .unwrap_or_default()
                    })
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => {
            // Dates display in the tape's day-first convention.
            if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                date.format("%d/%m/%Y").to_string()
            } else {
                s.clone()
            }
        }
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
