#![cfg(feature = "budget")]

use finguide_core::budget::{
    cash_budget, sales_budget, what_if, CashBudgetInput, SalesBudgetInput, Scenario, WhatIfInput,
};
use finguide_core::FinGuideError;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

#[test]
fn test_seasonal_sales_year() {
    let input = SalesBudgetInput {
        monthly_sales: vec![
            dec!(13_000),
            dec!(9_000),
            dec!(10_000),
            dec!(10_000),
            dec!(11_000),
            dec!(12_000),
            dec!(8_000),
            dec!(7_000),
            dec!(10_000),
            dec!(12_000),
            dec!(14_000),
            dec!(15_000),
        ],
    };
    let out = sales_budget(&input).unwrap();
    let budget = &out.result;
    assert_eq!(budget.annual_total, dec!(131_000));
    assert_eq!(budget.months[11].cumulative, budget.annual_total);
    assert_eq!(budget.months[11].month, "December");
    // (13k + 9k + 10k) / 3
    assert_eq!(budget.months[2].moving_average_3m.map(|v| v.round_dp(2)), Some(dec!(10_666.67)));
    assert_eq!(out.metadata.precision, "rust_decimal_128bit");
}

#[test]
fn test_default_cash_plan_runs_into_deficit() {
    let input = CashBudgetInput {
        collected_revenue: dec!(50_000),
        other_inflows: dec!(5_000),
        purchases: dec!(30_000),
        personnel_expenses: dec!(15_000),
        other_charges: dec!(10_000),
        seasonality: None,
    };
    let out = cash_budget(&input).unwrap();
    let plan = &out.result;
    assert_eq!(plan.months.len(), 12);
    assert!(plan.in_deficit);
    assert!(plan.suggested_credit_line.unwrap() >= dec!(5000));
    assert!(!out.warnings.is_empty());
}

#[test]
fn test_negative_purchases_rejected() {
    let input = CashBudgetInput {
        collected_revenue: dec!(50_000),
        other_inflows: dec!(0),
        purchases: dec!(-1),
        personnel_expenses: dec!(0),
        other_charges: dec!(0),
        seasonality: None,
    };
    match cash_budget(&input).unwrap_err() {
        FinGuideError::InvalidInput { field, .. } => assert_eq!(field, "purchases"),
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_optimistic_beats_pessimistic() {
    let input = WhatIfInput {
        base_revenue: dec!(600_000),
        margin_rate_pct: dec!(35),
        revenue_change_pct: dec!(0),
        fixed_cost_change_pct: dec!(0),
        base_fixed_costs: dec!(150_000),
    };
    let out = what_if(&input).unwrap().result;
    let optimistic = out.scenario(Scenario::Optimistic).unwrap();
    let pessimistic = out.scenario(Scenario::Pessimistic).unwrap();
    assert!(optimistic.result > pessimistic.result);
    // 720k * 35% * 1.1 - 135k
    assert_eq!(optimistic.result, dec!(142_200));
}
