use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{cell, is_scalar, payload};

/// Render output as tables: scalar fields first, then one table per
/// nested map or list of records.
pub fn print_table(value: &Value) {
    match payload(value) {
        Value::Object(map) => print_sections(map),
        Value::Array(items) => print_records(items),
        other => println!("{}", cell(other)),
    }

    if let Some(envelope) = value.as_object() {
        print_envelope_notes(envelope);
    }
}

fn print_sections(map: &Map<String, Value>) {
    let scalars: Vec<(&String, &Value)> = map.iter().filter(|(_, v)| is_scalar(v)).collect();
    if !scalars.is_empty() {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in scalars {
            builder.push_record([key.clone(), cell(val)]);
        }
        println!("{}", Table::from(builder));
    }

    for (key, val) in map.iter().filter(|(_, v)| !is_scalar(v)) {
        println!("\n{key}:");
        match val {
            Value::Object(nested) => print_key_values(nested),
            Value::Array(items) => print_records(items),
            _ => {}
        }
    }
}

fn print_key_values(map: &Map<String, Value>) {
    if map.is_empty() {
        println!("(none)");
        return;
    }
    let mut builder = Builder::default();
    builder.push_record(["Name", "Value"]);
    for (key, val) in map {
        builder.push_record([key.clone(), cell(val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_records(items: &[Value]) {
    if items.is_empty() {
        println!("(none)");
        return;
    }

    let Some(Value::Object(first)) = items.first() else {
        for item in items {
            println!("{}", cell(item));
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(headers.clone());
    for item in items {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(cell).unwrap_or_default())
                .collect();
            builder.push_record(row);
        }
    }
    println!("{}", Table::from(builder));
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {w}");
            }
        }
    }

    if let Some(Value::String(methodology)) = envelope.get("methodology") {
        println!("\nMethodology: {methodology}");
    }
}
