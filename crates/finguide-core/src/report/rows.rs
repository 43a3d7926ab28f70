//! Flat, spreadsheet-shaped views of the statements and computed figures.
//!
//! Rows carry display labels so they can be exported as is and read back
//! through [`balance_sheet_from_rows`].

use serde::{Deserialize, Serialize};

use crate::ratios::{RatioSet, RatioValue};
use crate::sig::IntermediateBalances;
use crate::statements::ingest::{balance_sheet_from_entries, Ingested};
use crate::statements::{BalanceSheet, BalanceSheetItem, IncomeStatement};
use crate::types::Money;
use crate::{FinGuideError, FinGuideResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheetRow {
    pub category: String,
    pub subcategory: String,
    pub item: String,
    pub amount: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeStatementRow {
    pub item: String,
    pub value: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatioRow {
    pub ratio: String,
    pub value: RatioValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceRow {
    pub balance: String,
    pub value: Money,
}

/// Sum of one (category, subcategory) group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsectionTotal {
    pub category: String,
    pub subcategory: String,
    pub amount: Money,
}

/// One row per line item, in template order.
pub fn balance_sheet_rows(balance_sheet: &BalanceSheet) -> Vec<BalanceSheetRow> {
    balance_sheet
        .items()
        .map(|(item, amount)| BalanceSheetRow {
            category: item.section().label().to_string(),
            subcategory: item.subsection().label().to_string(),
            item: item.label().to_string(),
            amount,
        })
        .collect()
}

pub fn income_statement_rows(income_statement: &IncomeStatement) -> Vec<IncomeStatementRow> {
    income_statement
        .items()
        .map(|(item, value)| IncomeStatementRow {
            item: item.label().to_string(),
            value,
        })
        .collect()
}

pub fn ratio_rows(ratios: &RatioSet) -> Vec<RatioRow> {
    ratios
        .iter()
        .map(|(kind, value)| RatioRow {
            ratio: kind.label().to_string(),
            value,
        })
        .collect()
}

pub fn balance_rows(balances: &IntermediateBalances) -> Vec<BalanceRow> {
    balances
        .iter()
        .map(|(kind, value)| BalanceRow {
            balance: kind.label().to_string(),
            value,
        })
        .collect()
}

/// Group rows by (category, subcategory) and sum their amounts.
/// Groups keep the order in which they first appear.
pub fn aggregate_balance_rows(rows: &[BalanceSheetRow]) -> FinGuideResult<Vec<SubsectionTotal>> {
    let mut totals: Vec<SubsectionTotal> = Vec::new();
    for row in rows {
        match totals
            .iter_mut()
            .find(|t| t.category == row.category && t.subcategory == row.subcategory)
        {
            Some(total) => {
                total.amount = total.amount.checked_add(row.amount).ok_or_else(|| {
                    FinGuideError::Overflow {
                        context: format!("{} / {} total", row.category, row.subcategory),
                    }
                })?;
            }
            None => totals.push(SubsectionTotal {
                category: row.category.clone(),
                subcategory: row.subcategory.clone(),
                amount: row.amount,
            }),
        }
    }
    Ok(totals)
}

/// Rebuild a balance sheet from exported rows.
///
/// A row whose item is known but filed under the wrong category or
/// subcategory is a structural error. Unknown items are reported in
/// `unknown_keys`, absent items in `missing`.
pub fn balance_sheet_from_rows(
    rows: &[BalanceSheetRow],
) -> FinGuideResult<Ingested<BalanceSheet>> {
    for row in rows {
        let Some(item) = BalanceSheetItem::lookup(&row.item) else {
            continue;
        };
        let section_ok = row.category.eq_ignore_ascii_case(item.section().label());
        let subsection_ok = row
            .subcategory
            .eq_ignore_ascii_case(item.subsection().label());
        if !section_ok || !subsection_ok {
            return Err(FinGuideError::StructuralMismatch {
                statement: "balance_sheet".into(),
                detail: format!(
                    "'{}' belongs to {} / {}, found under {} / {}",
                    row.item,
                    item.section().label(),
                    item.subsection().label(),
                    row.category,
                    row.subcategory
                ),
            });
        }
    }
    Ok(balance_sheet_from_entries(
        rows.iter().map(|row| (row.item.as_str(), row.amount)),
    ))
}
