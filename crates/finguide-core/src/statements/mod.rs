pub mod balance_sheet;
pub mod income_statement;
pub mod ingest;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

pub use balance_sheet::{BalanceSheet, BalanceSheetItem, Section, Subsection};
pub use income_statement::{IncomeStatement, IncomeStatementItem};

/// A line item of either statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "statement", content = "item", rename_all = "snake_case")]
pub enum LineItem {
    BalanceSheet(BalanceSheetItem),
    IncomeStatement(IncomeStatementItem),
}

impl LineItem {
    pub fn key(self) -> &'static str {
        match self {
            Self::BalanceSheet(item) => item.key(),
            Self::IncomeStatement(item) => item.key(),
        }
    }
}

impl fmt::Display for LineItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BalanceSheet(item) => write!(f, "balance_sheet.{}", item.key()),
            Self::IncomeStatement(item) => write!(f, "income_statement.{}", item.key()),
        }
    }
}

impl From<BalanceSheetItem> for LineItem {
    fn from(item: BalanceSheetItem) -> Self {
        Self::BalanceSheet(item)
    }
}

impl From<IncomeStatementItem> for LineItem {
    fn from(item: IncomeStatementItem) -> Self {
        Self::IncomeStatement(item)
    }
}

/// Line items that were never supplied. Computations depending on any of
/// them are omitted rather than treating the amount as zero.
pub type MissingItems = BTreeSet<LineItem>;
