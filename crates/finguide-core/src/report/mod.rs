pub mod rows;
pub mod workbook;

pub use rows::{
    aggregate_balance_rows, balance_rows, balance_sheet_from_rows, balance_sheet_rows,
    income_statement_rows, ratio_rows, BalanceRow, BalanceSheetRow, IncomeStatementRow, RatioRow,
    SubsectionTotal,
};
pub use workbook::{build_workbook, Sheet, Workbook};
