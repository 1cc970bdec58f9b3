use serde_json::Value;

/// Print just the key answer value from the output.
///
/// Heuristic: row arrays report their length; analysis envelopes report the
/// headline totals; anything else falls back to the first field.
pub fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Array(rows) = result {
        println!("{} rows", rows.len());
        return;
    }

    let priority_keys = [
        "periods_to_payoff",
        "total_interest",
        "total_prepayment",
        "total_principal",
    ];

    if let Value::Object(map) = result {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}: {}", key, format_minimal(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
