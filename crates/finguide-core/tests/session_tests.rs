use finguide_core::ratios::{AnalysisProfile, NetResultPolicy, RatioKind, RatioValue};
use finguide_core::session::{run_analysis, Session};
use finguide_core::statements::{BalanceSheet, BalanceSheetItem, IncomeStatementItem};
use finguide_core::DiagnosticCode;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;

fn session_document() -> serde_json::Value {
    json!({
        "balance_sheet": {
            "assets": {
                "fixed_assets": { "tangible_fixed_assets": 100000 },
                "current_assets": {
                    "inventories": 20000,
                    "trade_receivables": 25000,
                    "cash": 15000,
                    "other_current_assets": 0
                }
            },
            "liabilities": {
                "equity": {
                    "share_capital": 80000,
                    "retained_earnings": 30000,
                    "net_income_for_period": null
                },
                "debt": { "financial_debt": 30000, "trade_payables": 20000, "other_liabilities": 0 }
            }
        },
        "income_statement": {
            "Revenue": "200000",
            "Purchases of goods": 80000,
            "inventory_variation": 5000,
            "other_external_expenses": 40000,
            "personnel_expenses": 50000,
            "depreciation_expense": 10000,
            "financial_income": 2000,
            "financial_expenses": 8000,
            "income_tax_expense": 5000
        },
        "profile": { "include_inventory_days": false }
    })
}

#[test]
fn test_document_with_gaps_keeps_missing_items_out_of_ratios() {
    let session = Session::from_value(&session_document()).unwrap();
    // three balance-sheet items (one of them null) and two income-statement items
    assert_eq!(session.missing.len(), 5);

    let analysis = session.analyze();
    assert_eq!(analysis.total_assets, Some(dec!(160_000)));
    assert_eq!(analysis.balanced, Some(true));
    assert_eq!(
        analysis.ratios.get(RatioKind::CurrentRatio),
        Some(RatioValue::Finite(dec!(1.2)))
    );
    // both need fixed assets, which were never supplied
    assert!(!analysis.ratios.contains(RatioKind::DebtRatioPct));
    assert!(!analysis.ratios.contains(RatioKind::RoaPct));
    assert!(!analysis.ratios.contains(RatioKind::InventoryDays));
    assert!(analysis
        .diagnostics
        .iter()
        .any(|d| d.code == DiagnosticCode::MissingLineItems));
}

#[test]
fn test_filled_session_computes_everything() {
    let mut session = Session::from_value(&session_document()).unwrap();
    for item in [
        BalanceSheetItem::IntangibleFixedAssets,
        BalanceSheetItem::FinancialFixedAssets,
        BalanceSheetItem::OtherCurrentAssets,
        BalanceSheetItem::NetIncomeForPeriod,
        BalanceSheetItem::OtherLiabilities,
    ] {
        session.set_balance_item(item, dec!(0));
    }
    session.set_income_item(IncomeStatementItem::TaxesAndDuties, dec!(0));
    session.set_income_item(IncomeStatementItem::OtherExpenses, dec!(0));
    assert!(session.missing.is_empty());

    let analysis = session.analyze();
    assert_eq!(
        analysis.intermediate_balances.map(|b| b.net_result),
        Some(dec!(14_000))
    );
    assert_eq!(analysis.ratios.len(), 9);
    assert!(session.workbook().is_some());
}

#[test]
fn test_session_profile_can_switch_policy() {
    let mut session = Session::new();
    session.set_income_item(IncomeStatementItem::Revenue, dec!(1_000));
    session.set_income_item(IncomeStatementItem::FinancialIncome, dec!(100));
    session.set_balance_item(BalanceSheetItem::Cash, dec!(1_000));
    session.set_balance_item(BalanceSheetItem::ShareCapital, dec!(1_000));

    let quirk = session.analyze();
    // financial income is ignored
    assert_eq!(
        quirk.ratios.get(RatioKind::RoaPct),
        Some(RatioValue::Finite(dec!(100)))
    );

    let session = session.with_profile(
        AnalysisProfile::default().with_net_result(NetResultPolicy::IntermediateBalances),
    );
    let cascade = session.analyze();
    assert_eq!(
        cascade.ratios.get(RatioKind::RoaPct),
        Some(RatioValue::Finite(dec!(110)))
    );
}

#[test]
fn test_run_analysis_reports_warnings() {
    let mut session = Session::new();
    session.set_balance_item(BalanceSheetItem::Cash, dec!(500));
    let output = run_analysis(&session);
    assert_eq!(output.result.balanced, Some(false));
    assert!(output.warnings.iter().any(|w| w.contains("differ")));
}

#[test]
fn test_bad_profile_in_document_is_an_error() {
    let doc = json!({ "profile": { "net_result": "sometimes" } });
    assert!(Session::from_value(&doc).is_err());
}

#[test]
fn test_workbook_leaves_out_balances_built_on_missing_items() {
    let doc = json!({
        "balance_sheet": serde_json::to_value(BalanceSheet::template()).unwrap(),
        "income_statement": { "revenue": 1000 },
    });
    let session = Session::from_value(&doc).unwrap();

    let analysis = session.analyze();
    assert_eq!(analysis.intermediate_balances, None);

    let reason = session.intermediate_balances().unwrap_err();
    assert_eq!(reason.code, DiagnosticCode::MissingLineItems);

    let workbook = session.workbook().unwrap();
    let sheet = workbook.sheet("Intermediate Balances").unwrap();
    assert_eq!(sheet.headers, vec!["Balance", "Value"]);
    assert!(sheet.rows.is_empty());
}

#[test]
fn test_extreme_amounts_are_reported_not_fatal() {
    let mut session = Session::new();
    session.set_balance_item(BalanceSheetItem::Cash, Decimal::MAX);
    session.set_balance_item(BalanceSheetItem::Inventories, Decimal::MAX);
    session.set_income_item(IncomeStatementItem::Revenue, dec!(1_000));
    session.set_income_item(IncomeStatementItem::PurchasesOfGoods, Decimal::MIN);

    let analysis = session.analyze();
    assert_eq!(analysis.total_assets, None);
    assert_eq!(analysis.balanced, Some(false));
    assert_eq!(analysis.intermediate_balances, None);
    assert!(!analysis.ratios.contains(RatioKind::CurrentRatio));
    assert!(analysis
        .diagnostics
        .iter()
        .any(|d| d.code == DiagnosticCode::Overflow
            && d.subject.as_deref() == Some("intermediate_balances")));

    let workbook = session.workbook().unwrap();
    assert!(workbook.sheet("Intermediate Balances").unwrap().rows.is_empty());
}
