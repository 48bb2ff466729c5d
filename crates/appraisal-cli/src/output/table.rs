use serde_json::Value;
use tabled::{builder::Builder, Table};

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
        _ => {
            println!("{}", value);
        }
    }
}

fn print_result_table(result: &Value, envelope: &serde_json::Map<String, Value>) {
    if let Value::Object(res_map) = result {
        let mut builder = Builder::default();
        builder.push_record(["Metric", "Value"]);
        for (key, val) in res_map {
            if *key == "decisions" {
                continue;
            }
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        let table = Table::from(builder);
        println!("{}", table);

        // Verdicts get their own section
        if let Some(Value::Object(decisions)) = res_map.get("decisions") {
            let mut builder = Builder::default();
            builder.push_record(["Technique", "Verdict"]);
            for (key, val) in decisions {
                builder.push_record([key.as_str(), &format_value(val)]);
            }
            println!("\n{}", Table::from(builder));
        }
    } else {
        print_flat_object(&Value::Object(envelope.clone()));
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
        builder.push_record(["Metric", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        let table = Table::from(builder);
        println!("{}", table);
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(map) => {
            // Payback's tagged form reads better flattened
            if map.len() == 1 {
                if let Some((tag, inner)) = map.iter().next() {
                    if let Value::Object(fields) = inner {
                        if fields.len() == 1 {
                            let (_, v) = fields.iter().next().unwrap();
                            return format!("{} ({})", format_value(v), tag);
                        }
                    }
                }
            }
            serde_json::to_string(value).unwrap_or_default()
        }
    }
}
