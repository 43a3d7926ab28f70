use finguide_core::sig::{compute_intermediate_balances, BalanceKind};
use finguide_core::statements::IncomeStatement;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn trading_company() -> IncomeStatement {
    IncomeStatement {
        revenue: dec!(200_000),
        purchases_of_goods: dec!(80_000),
        inventory_variation: dec!(5_000),
        other_external_expenses: dec!(40_000),
        personnel_expenses: dec!(50_000),
        depreciation_expense: dec!(10_000),
        financial_income: dec!(2_000),
        financial_expenses: dec!(8_000),
        income_tax_expense: dec!(5_000),
        ..IncomeStatement::template()
    }
}

#[test]
fn test_full_cascade() {
    let sig = compute_intermediate_balances(&trading_company()).unwrap();
    let values: Vec<Decimal> = sig.iter().map(|(_, v)| v).collect();
    assert_eq!(
        values,
        vec![
            dec!(125_000),
            dec!(85_000),
            dec!(35_000),
            dec!(25_000),
            dec!(19_000),
            dec!(14_000)
        ]
    );
}

#[test]
fn test_each_step_adjusts_the_previous_one() {
    let is = trading_company();
    let sig = compute_intermediate_balances(&is).unwrap();
    assert_eq!(sig.value_added, sig.commercial_margin - is.other_external_expenses);
    assert_eq!(sig.ebe, sig.value_added - is.personnel_expenses);
    assert_eq!(sig.operating_result, sig.ebe - is.depreciation_expense);
    assert_eq!(
        sig.ordinary_result,
        sig.operating_result + is.financial_income - is.financial_expenses
    );
    assert_eq!(sig.net_result, sig.ordinary_result - is.income_tax_expense);
}

#[test]
fn test_no_revenue_means_zero_commercial_margin() {
    let mut is = trading_company();
    is.revenue = Decimal::ZERO;
    let sig = compute_intermediate_balances(&is).unwrap();
    assert_eq!(sig.commercial_margin, Decimal::ZERO);
    // later steps still subtract their charges
    assert_eq!(sig.value_added, dec!(-40_000));
    assert_eq!(sig.get(BalanceKind::NetResult), dec!(-111_000));
}

#[test]
fn test_balances_serialize_as_strings() {
    let sig = compute_intermediate_balances(&trading_company()).unwrap();
    let json = serde_json::to_value(sig).unwrap();
    assert_eq!(json["ebe"], "35000");
    assert_eq!(json["net_result"], "14000");
}
