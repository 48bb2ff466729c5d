use serde_json::Value;

/// Print just the key answer value from the output.
///
/// Heuristic: look for the headline appraisal metrics in order of priority,
/// then fall back to the first field in the result object.
pub fn print_minimal(value: &Value) {
    // Try to extract the "result" envelope
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    // Priority list of key output fields
    let priority_keys = [
        "npv",
        "irr",
        "mirr",
        "profitability_index",
        "payback",
        "discounted_payback",
        "rate",
    ];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result_obj));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        // IrrSolution and Payback serialize as small objects; surface the
        // number inside rather than the whole structure
        Value::Object(map) => {
            if let Some(rate) = map.get("rate") {
                return format_minimal(rate);
            }
            if let Some(Value::Object(recovered)) = map.get("Recovered") {
                if let Some(years) = recovered.get("years") {
                    return format_minimal(years);
                }
            }
            serde_json::to_string(value).unwrap_or_default()
        }
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
