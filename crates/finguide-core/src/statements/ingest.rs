//! Conversion of loosely-keyed input (JSON editors, spreadsheet rows) into
//! typed statements.
//!
//! Keys may be item keys (`trade_receivables`) or display labels
//! (`Trade receivables`), either flat or nested under section/subsection
//! objects. Items that never appear are reported as missing instead of being
//! assumed zero; unrecognised keys are reported back to the caller.

use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::BTreeSet;
use std::str::FromStr;

use super::{
    BalanceSheet, BalanceSheetItem, IncomeStatement, IncomeStatementItem, LineItem, MissingItems,
};
use crate::types::{Diagnostic, DiagnosticCode, Money, Severity};
use crate::{FinGuideError, FinGuideResult};

/// A statement built from loose input, with what could not be matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingested<T> {
    pub statement: T,
    pub missing: MissingItems,
    pub unknown_keys: Vec<String>,
}

impl<T> Ingested<T> {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.unknown_keys.is_empty()
    }

}

/// Warning for an input key that matched no line item.
pub fn unknown_key_diagnostic(key: &str) -> Diagnostic {
    Diagnostic::new(
        Severity::Warning,
        DiagnosticCode::UnknownLineItem,
        format!("'{key}' does not match any template line item and was ignored"),
    )
    .about(key)
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn balance_sheet_from_value(value: &Value) -> FinGuideResult<Ingested<BalanceSheet>> {
    let entries = collect_entries("balance_sheet", value)?;
    Ok(assemble(
        entries,
        BalanceSheet::template(),
        &BalanceSheetItem::ALL,
        BalanceSheetItem::lookup,
        BalanceSheet::set,
    ))
}

pub fn income_statement_from_value(value: &Value) -> FinGuideResult<Ingested<IncomeStatement>> {
    let entries = collect_entries("income_statement", value)?;
    Ok(assemble(
        entries,
        IncomeStatement::template(),
        &IncomeStatementItem::ALL,
        IncomeStatementItem::lookup,
        IncomeStatement::set,
    ))
}

/// Build a balance sheet from `(item name, amount)` pairs. Later duplicates win.
pub fn balance_sheet_from_entries<I, S>(entries: I) -> Ingested<BalanceSheet>
where
    I: IntoIterator<Item = (S, Money)>,
    S: AsRef<str>,
{
    assemble(
        to_entries(entries),
        BalanceSheet::template(),
        &BalanceSheetItem::ALL,
        BalanceSheetItem::lookup,
        BalanceSheet::set,
    )
}

/// Build an income statement from `(item name, amount)` pairs. Later duplicates win.
pub fn income_statement_from_entries<I, S>(entries: I) -> Ingested<IncomeStatement>
where
    I: IntoIterator<Item = (S, Money)>,
    S: AsRef<str>,
{
    assemble(
        to_entries(entries),
        IncomeStatement::template(),
        &IncomeStatementItem::ALL,
        IncomeStatementItem::lookup,
        IncomeStatement::set,
    )
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

struct Entry {
    path: String,
    name: String,
    amount: Option<Money>,
}

fn to_entries<I, S>(entries: I) -> Vec<Entry>
where
    I: IntoIterator<Item = (S, Money)>,
    S: AsRef<str>,
{
    entries
        .into_iter()
        .map(|(name, amount)| Entry {
            path: name.as_ref().to_string(),
            name: name.as_ref().to_string(),
            amount: Some(amount),
        })
        .collect()
}

fn assemble<T, I>(
    entries: Vec<Entry>,
    mut statement: T,
    all: &[I],
    lookup: fn(&str) -> Option<I>,
    set: fn(&mut T, I, Money),
) -> Ingested<T>
where
    I: Copy + Ord + Into<LineItem>,
{
    let mut seen = BTreeSet::new();
    let mut unknown_keys = Vec::new();

    for entry in entries {
        match lookup(&entry.name) {
            Some(item) => {
                // null / blank cells leave the item missing
                if let Some(amount) = entry.amount {
                    set(&mut statement, item, amount);
                    seen.insert(item);
                }
            }
            None => unknown_keys.push(entry.path),
        }
    }

    let missing = all
        .iter()
        .copied()
        .filter(|item| !seen.contains(item))
        .map(Into::into)
        .collect();

    Ingested {
        statement,
        missing,
        unknown_keys,
    }
}

fn collect_entries(statement: &str, value: &Value) -> FinGuideResult<Vec<Entry>> {
    let Value::Object(map) = value else {
        return Err(FinGuideError::StructuralMismatch {
            statement: statement.into(),
            detail: "expected an object of line items".into(),
        });
    };
    let mut entries = Vec::new();
    walk(map, "", &mut entries)?;
    Ok(entries)
}

fn walk(
    map: &serde_json::Map<String, Value>,
    prefix: &str,
    entries: &mut Vec<Entry>,
) -> FinGuideResult<()> {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        if let Value::Object(nested) = value {
            walk(nested, &path, entries)?;
        } else {
            let amount = parse_amount(&path, value)?;
            entries.push(Entry {
                path,
                name: key.clone(),
                amount,
            });
        }
    }
    Ok(())
}

fn parse_amount(path: &str, value: &Value) -> FinGuideResult<Option<Money>> {
    let invalid = |reason: &str| FinGuideError::InvalidInput {
        field: path.to_string(),
        reason: reason.to_string(),
    };
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => parse_decimal(&n.to_string())
            .map(Some)
            .ok_or_else(|| invalid("number is out of decimal range")),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => parse_decimal(s.trim())
            .map(Some)
            .ok_or_else(|| invalid("amount is not a decimal number")),
        _ => Err(invalid("amount must be a number or numeric string")),
    }
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
