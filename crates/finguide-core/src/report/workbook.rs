use serde::{Deserialize, Serialize};
use tracing::debug;

use super::rows::{balance_rows, balance_sheet_rows, income_statement_rows, ratio_rows};
use crate::ratios::{interpret_all, RatioSet};
use crate::recommendations::action_plan;
use crate::sig::IntermediateBalances;
use crate::statements::{BalanceSheet, IncomeStatement};

/// Decimal places kept for ratio cells.
const RATIO_DP: u32 = 4;

pub const BALANCE_SHEET: &str = "Balance Sheet";
pub const INCOME_STATEMENT: &str = "Income Statement";
pub const RATIOS: &str = "Ratios";
pub const INTERMEDIATE_BALANCES: &str = "Intermediate Balances";
pub const INTERPRETATIONS: &str = "Interpretations";
pub const ACTION_PLAN: &str = "Action Plan";

/// A named table of string cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    fn new(name: &str, headers: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}

/// Assemble the exportable report. Every sheet is present, even when it
/// has no rows; `balances` is `None` when the cascade could not be computed.
pub fn build_workbook(
    balance_sheet: &BalanceSheet,
    income_statement: &IncomeStatement,
    ratios: &RatioSet,
    balances: Option<&IntermediateBalances>,
) -> Workbook {
    let mut bs_sheet = Sheet::new(BALANCE_SHEET, &["Category", "Subcategory", "Item", "Amount"]);
    for row in balance_sheet_rows(balance_sheet) {
        bs_sheet.push(vec![row.category, row.subcategory, row.item, row.amount.to_string()]);
    }

    let mut is_sheet = Sheet::new(INCOME_STATEMENT, &["Item", "Value"]);
    for row in income_statement_rows(income_statement) {
        is_sheet.push(vec![row.item, row.value.to_string()]);
    }

    let mut ratio_sheet = Sheet::new(RATIOS, &["Ratio", "Value"]);
    for row in ratio_rows(ratios) {
        ratio_sheet.push(vec![row.ratio, row.value.round_dp(RATIO_DP).to_string()]);
    }

    let mut sig_sheet = Sheet::new(INTERMEDIATE_BALANCES, &["Balance", "Value"]);
    for row in balances.map(balance_rows).unwrap_or_default() {
        sig_sheet.push(vec![row.balance, row.value.to_string()]);
    }

    let mut interpretation_sheet =
        Sheet::new(INTERPRETATIONS, &["Ratio", "Value", "Band", "Interpretation"]);
    for interpretation in interpret_all(ratios) {
        interpretation_sheet.push(vec![
            interpretation.kind.label().to_string(),
            interpretation.value.round_dp(RATIO_DP).to_string(),
            interpretation.band.label().to_string(),
            interpretation.message().to_string(),
        ]);
    }

    let mut plan_sheet = Sheet::new(ACTION_PLAN, &["Aspect", "Objective", "Actions"]);
    for entry in action_plan() {
        plan_sheet.push(vec![
            entry.aspect.to_string(),
            entry.objective.to_string(),
            entry.actions.to_string(),
        ]);
    }

    let sheets = vec![
        bs_sheet,
        is_sheet,
        ratio_sheet,
        sig_sheet,
        interpretation_sheet,
        plan_sheet,
    ];
    debug!(sheets = sheets.len(), "workbook assembled");
    Workbook { sheets }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ratios::{RatioKind, RatioValue};
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_inputs_still_produce_every_sheet() {
        let wb = build_workbook(
            &BalanceSheet::template(),
            &IncomeStatement::template(),
            &RatioSet::new(),
            None,
        );
        assert_eq!(
            wb.sheet_names(),
            vec![
                BALANCE_SHEET,
                INCOME_STATEMENT,
                RATIOS,
                INTERMEDIATE_BALANCES,
                INTERPRETATIONS,
                ACTION_PLAN
            ]
        );
        assert!(wb.sheet(RATIOS).unwrap().rows.is_empty());
        assert!(wb.sheet(INTERMEDIATE_BALANCES).unwrap().rows.is_empty());
        assert_eq!(wb.sheet(ACTION_PLAN).unwrap().rows.len(), 5);
    }

    #[test]
    fn test_ratio_cells_rounded_and_infinite() {
        let ratios: RatioSet = [
            (RatioKind::CurrentRatio, RatioValue::Infinite),
            (RatioKind::RoaPct, RatioValue::Finite(dec!(1.234567))),
        ]
        .into_iter()
        .collect();
        let wb = build_workbook(
            &BalanceSheet::template(),
            &IncomeStatement::template(),
            &ratios,
            Some(&IntermediateBalances::default()),
        );
        let sheet = wb.sheet(RATIOS).unwrap();
        assert_eq!(sheet.rows[0], vec!["Current ratio", "inf"]);
        assert_eq!(sheet.rows[1], vec!["ROA (%)", "1.2346"]);
    }
}
