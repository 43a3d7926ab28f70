use finguide_core::ratios::compute_ratios;
use finguide_core::report::{
    aggregate_balance_rows, balance_sheet_from_rows, balance_sheet_rows, build_workbook,
    income_statement_rows,
};
use finguide_core::sig::compute_intermediate_balances;
use finguide_core::statements::{BalanceSheet, BalanceSheetItem, IncomeStatement, Subsection};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn manufacturer() -> (BalanceSheet, IncomeStatement) {
    let mut bs = BalanceSheet::template();
    bs.set(BalanceSheetItem::IntangibleFixedAssets, dec!(12_500.25));
    bs.set(BalanceSheetItem::TangibleFixedAssets, dec!(240_000));
    bs.set(BalanceSheetItem::FinancialFixedAssets, dec!(7_499.75));
    bs.set(BalanceSheetItem::Inventories, dec!(45_000));
    bs.set(BalanceSheetItem::TradeReceivables, dec!(60_000));
    bs.set(BalanceSheetItem::Cash, dec!(35_000));
    bs.set(BalanceSheetItem::ShareCapital, dec!(150_000));
    bs.set(BalanceSheetItem::RetainedEarnings, dec!(70_000));
    bs.set(BalanceSheetItem::NetIncomeForPeriod, dec!(20_000));
    bs.set(BalanceSheetItem::FinancialDebt, dec!(100_000));
    bs.set(BalanceSheetItem::TradePayables, dec!(50_000));
    bs.set(BalanceSheetItem::OtherLiabilities, dec!(10_000));

    let is = IncomeStatement {
        revenue: dec!(420_000),
        purchases_of_goods: dec!(150_000),
        other_external_expenses: dec!(60_000),
        personnel_expenses: dec!(110_000),
        depreciation_expense: dec!(25_000),
        financial_expenses: dec!(6_000),
        income_tax_expense: dec!(15_000),
        ..IncomeStatement::template()
    };
    (bs, is)
}

#[test]
fn test_flatten_then_aggregate_reproduces_subsection_totals() {
    let (bs, _) = manufacturer();
    let totals = aggregate_balance_rows(&balance_sheet_rows(&bs)).unwrap();

    let expected: Vec<_> = Subsection::ALL
        .into_iter()
        .map(|s| (s.label().to_string(), bs.subsection_total(s)))
        .collect();
    let actual: Vec<_> = totals
        .into_iter()
        .map(|t| (t.subcategory, Some(t.amount)))
        .collect();
    assert_eq!(actual, expected);
    assert_eq!(bs.subsection_total(Subsection::FixedAssets), Some(dec!(260_000)));
}

#[test]
fn test_exported_rows_read_back_exactly() {
    let (bs, _) = manufacturer();
    let back = balance_sheet_from_rows(&balance_sheet_rows(&bs)).unwrap();
    assert!(back.is_complete());
    assert_eq!(back.statement, bs);
}

#[test]
fn test_income_statement_rows_in_template_order() {
    let (_, is) = manufacturer();
    let rows = income_statement_rows(&is);
    assert_eq!(rows.len(), 11);
    assert_eq!(rows[0].item, "Revenue");
    assert_eq!(rows[0].value, dec!(420_000));
}

#[test]
fn test_workbook_contents() {
    let (bs, is) = manufacturer();
    let ratios = compute_ratios(&bs, &is);
    let sig = compute_intermediate_balances(&is);
    let wb = build_workbook(&bs, &is, &ratios, sig.as_ref());

    let bs_sheet = wb.sheet("Balance Sheet").unwrap();
    assert_eq!(bs_sheet.headers, vec!["Category", "Subcategory", "Item", "Amount"]);
    assert_eq!(bs_sheet.rows.len(), 13);
    assert_eq!(
        bs_sheet.rows[0],
        vec!["Assets", "Fixed assets", "Intangible fixed assets", "12500.25"]
    );

    let sig_sheet = wb.sheet("Intermediate Balances").unwrap();
    assert_eq!(sig_sheet.rows.len(), 6);
    // 420k - 150k
    assert_eq!(sig_sheet.rows[0], vec!["Commercial margin", "270000"]);

    let ratio_sheet = wb.sheet("Ratios").unwrap();
    assert_eq!(ratio_sheet.rows.len(), ratios.len());
    // current 140k / 160k
    assert!(ratio_sheet
        .rows
        .iter()
        .any(|r| r[0] == "Current ratio" && r[1] == "0.875"));

    let interpretations = wb.sheet("Interpretations").unwrap();
    assert_eq!(interpretations.headers.len(), 4);
    assert_eq!(interpretations.rows.len(), 6);
}
