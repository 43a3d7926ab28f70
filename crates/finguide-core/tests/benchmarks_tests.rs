#![cfg(feature = "benchmarks")]

use finguide_core::benchmarks::{compare_to_sector, Sector};
use finguide_core::ratios::{compute_ratios, RatioKind};
use finguide_core::statements::{BalanceSheet, BalanceSheetItem, IncomeStatement};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

#[test]
fn test_compare_services_company() {
    let mut bs = BalanceSheet::template();
    bs.set(BalanceSheetItem::TangibleFixedAssets, dec!(50_000));
    bs.set(BalanceSheetItem::Cash, dec!(50_000));
    bs.set(BalanceSheetItem::ShareCapital, dec!(75_000));
    bs.set(BalanceSheetItem::FinancialDebt, dec!(25_000));
    let is = IncomeStatement {
        revenue: dec!(150_000),
        personnel_expenses: dec!(130_000),
        ..IncomeStatement::template()
    };

    let rows = compare_to_sector(&compute_ratios(&bs, &is), Sector::Services);
    let current = rows.iter().find(|r| r.ratio == RatioKind::CurrentRatio).unwrap();
    // 50k / 25k = 2.0 against 1.9
    assert_eq!(current.difference, Some(dec!(0.1)));
    let debt = rows.iter().find(|r| r.ratio == RatioKind::DebtRatioPct).unwrap();
    // 25% against 45%
    assert_eq!(debt.difference, Some(dec!(-20)));
}

#[test]
fn test_every_sector_parses_from_its_label() {
    for sector in Sector::ALL {
        assert_eq!(sector.label().parse::<Sector>().unwrap(), sector);
    }
}
