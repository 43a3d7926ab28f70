use serde_json::Value;

use super::{cell, payload};

/// Headline figure of each command, in lookup order.
const HEADLINE_KEYS: [&str; 8] = [
    "current_ratio",
    "net_result",
    "annual_total",
    "minimum_balance",
    "recommendations",
    "ratios",
    "scenarios",
    "files",
];

/// Print only the headline answer of the output.
pub fn print_minimal(value: &Value) {
    let result = payload(value);

    if let Value::Object(map) = result {
        for key in HEADLINE_KEYS {
            match map.get(key) {
                Some(Value::Null) | None => continue,
                Some(Value::Object(nested)) => {
                    for (k, v) in nested {
                        println!("{k}: {}", cell(v));
                    }
                    return;
                }
                Some(Value::Array(items)) => {
                    println!("{key}: {}", items.len());
                    return;
                }
                Some(v) => {
                    println!("{}", cell(v));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{key}: {}", cell(val));
            return;
        }
    }

    if let Value::Array(items) = result {
        println!("{}", items.len());
        return;
    }

    println!("{}", cell(result));
}
