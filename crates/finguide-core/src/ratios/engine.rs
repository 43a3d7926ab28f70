use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{AnalysisProfile, NetResultPolicy, RatioKind, RatioSet, RatioValue};
use crate::sig::{compute_intermediate_balances, BalanceKind};
use crate::statements::{
    BalanceSheet, BalanceSheetItem, IncomeStatement, IncomeStatementItem, LineItem, MissingItems,
    Subsection,
};
use crate::types::{Diagnostic, DiagnosticCode, Money, Severity};

const PERCENT: Decimal = dec!(100);

/// Commercial year used for inventory days.
const DAYS_IN_YEAR: Decimal = dec!(360);

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Ratios plus every reason a ratio was left out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatioReport {
    pub ratios: RatioSet,
    pub diagnostics: Vec<Diagnostic>,
}

impl RatioReport {
    /// True when no statement was available and nothing could be computed.
    pub fn is_pending(&self) -> bool {
        self.ratios.is_empty()
            && self
                .diagnostics
                .iter()
                .any(|d| d.code == DiagnosticCode::MissingInput)
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute every ratio with the default (comprehensive) profile.
pub fn compute_ratios(
    balance_sheet: &BalanceSheet,
    income_statement: &IncomeStatement,
) -> RatioSet {
    compute_ratios_with(
        Some(balance_sheet),
        Some(income_statement),
        &AnalysisProfile::default(),
        &MissingItems::new(),
    )
    .ratios
}

/// Compute the ratios selected by `profile`.
///
/// Absent statements yield an empty set with a `MissingInput` diagnostic.
/// Ratios depending on an item listed in `missing`, or whose denominator
/// rules them out, are omitted and explained in the diagnostics. Nothing
/// here panics on data.
pub fn compute_ratios_with(
    balance_sheet: Option<&BalanceSheet>,
    income_statement: Option<&IncomeStatement>,
    profile: &AnalysisProfile,
    missing: &MissingItems,
) -> RatioReport {
    let mut report = RatioReport::default();

    let (bs, is) = match (balance_sheet, income_statement) {
        (Some(bs), Some(is)) => (bs, is),
        (bs, is) => {
            let mut absent = Vec::new();
            if bs.is_none() {
                absent.push("balance sheet");
            }
            if is.is_none() {
                absent.push("income statement");
            }
            report.diagnostics.push(Diagnostic::new(
                Severity::Info,
                DiagnosticCode::MissingInput,
                format!("Ratios not yet computable: {} not provided", absent.join(" and ")),
            ));
            return report;
        }
    };

    match (bs.total_assets(), bs.total_liabilities(), bs.imbalance()) {
        (Some(assets), Some(liabilities), Some(gap)) if !gap.is_zero() => {
            report.diagnostics.push(Diagnostic::new(
                Severity::Warning,
                DiagnosticCode::Unbalanced,
                format!(
                    "Total assets ({assets}) differ from total liabilities ({liabilities}) by {gap}"
                ),
            ));
        }
        (Some(_), Some(_), Some(_)) => {}
        _ => report.diagnostics.push(Diagnostic::new(
            Severity::Warning,
            DiagnosticCode::Overflow,
            "Balance-sheet totals overflowed decimal range",
        )),
    }

    let figures = Figures::from_statements(bs, is, profile.net_result);
    let mut builder = Builder {
        profile,
        missing,
        report: &mut report,
    };

    builder.add(RatioKind::WorkingCapital, || value(figures.working_capital()));

    builder.add(RatioKind::CurrentRatio, || {
        let (Some(current_assets), Some(debt)) = (figures.current_assets, figures.debt) else {
            return Outcome::Overflow;
        };
        if debt.is_zero() {
            if current_assets >= Decimal::ZERO {
                Outcome::Value(RatioValue::Infinite)
            } else {
                Outcome::ZeroDenominator("debt is zero and current assets are negative")
            }
        } else {
            divide(current_assets, debt, Decimal::ONE)
        }
    });

    builder.add(RatioKind::DebtRatioPct, || {
        let (Some(debt), Some(total_assets)) = (figures.debt, figures.total_assets) else {
            return Outcome::Overflow;
        };
        if total_assets.is_zero() {
            Outcome::ZeroDenominator("total assets are zero")
        } else {
            divide(debt, total_assets, PERCENT)
        }
    });

    builder.add(RatioKind::RoaPct, || {
        let (Some(net_result), Some(total_assets)) = (figures.net_result, figures.total_assets)
        else {
            return Outcome::Overflow;
        };
        if total_assets.is_zero() {
            Outcome::ZeroDenominator("total assets are zero")
        } else {
            divide(net_result, total_assets, PERCENT)
        }
    });

    builder.add(RatioKind::RoePct, || {
        let (Some(net_result), Some(equity)) = (figures.net_result, figures.equity) else {
            return Outcome::Overflow;
        };
        if equity <= Decimal::ZERO {
            Outcome::ZeroDenominator("equity is zero or negative")
        } else {
            divide(net_result, equity, PERCENT)
        }
    });

    builder.add(RatioKind::NetMarginPct, || {
        let Some(net_result) = figures.net_result else {
            return Outcome::Overflow;
        };
        if figures.revenue.is_zero() {
            Outcome::ZeroDenominator("revenue is zero")
        } else {
            divide(net_result, figures.revenue, PERCENT)
        }
    });

    builder.add(RatioKind::AssetTurnover, || {
        let Some(total_assets) = figures.total_assets else {
            return Outcome::Overflow;
        };
        if total_assets.is_zero() {
            Outcome::ZeroDenominator("total assets are zero")
        } else {
            divide(figures.revenue, total_assets, Decimal::ONE)
        }
    });

    builder.add(RatioKind::InventoryDays, || {
        if figures.revenue > Decimal::ZERO && figures.inventories > Decimal::ZERO {
            divide(figures.inventories, figures.revenue, DAYS_IN_YEAR)
        } else {
            Outcome::ZeroDenominator("requires positive revenue and inventories")
        }
    });

    builder.add(RatioKind::WorkingCapitalNeed, || value(figures.working_capital_need()));

    builder.add(RatioKind::NetCashPosition, || value(figures.net_cash_position()));

    for diagnostic in report.diagnostics.iter().filter(|d| d.is_warning()) {
        warn!(code = ?diagnostic.code, "{}", diagnostic.message);
    }
    debug!(
        computed = report.ratios.len(),
        diagnostics = report.diagnostics.len(),
        "ratio computation finished"
    );

    report
}

/// Net result as the ratio engine sees it under `policy`; `None` on overflow.
pub fn net_result(income_statement: &IncomeStatement, policy: NetResultPolicy) -> Option<Money> {
    match policy {
        NetResultPolicy::ChargesExcludingFinancialIncome => income_statement
            .revenue
            .checked_sub(income_statement.charges_excluding_financial_income()?),
        NetResultPolicy::IntermediateBalances => {
            compute_intermediate_balances(income_statement).map(|sig| sig.net_result)
        }
    }
}

/// Line items a ratio reads, under the given net-result policy.
pub fn dependencies(kind: RatioKind, policy: NetResultPolicy) -> Vec<LineItem> {
    let subsection = |sub: Subsection| sub.items().map(LineItem::from).collect::<Vec<_>>();
    let total_assets = || {
        let mut items = subsection(Subsection::FixedAssets);
        items.extend(subsection(Subsection::CurrentAssets));
        items
    };
    let net_result_inputs = || -> Vec<LineItem> {
        match policy {
            NetResultPolicy::ChargesExcludingFinancialIncome => IncomeStatementItem::ALL
                .into_iter()
                .filter(|i| *i != IncomeStatementItem::FinancialIncome)
                .map(LineItem::from)
                .collect(),
            NetResultPolicy::IntermediateBalances => BalanceKind::NetResult
                .inputs()
                .into_iter()
                .map(LineItem::from)
                .collect(),
        }
    };
    let working_capital_need = || -> Vec<LineItem> {
        vec![
            BalanceSheetItem::Inventories.into(),
            BalanceSheetItem::TradeReceivables.into(),
            BalanceSheetItem::TradePayables.into(),
        ]
    };

    let mut items = match kind {
        RatioKind::WorkingCapital | RatioKind::CurrentRatio => {
            let mut items = subsection(Subsection::CurrentAssets);
            items.extend(subsection(Subsection::Debt));
            items
        }
        RatioKind::DebtRatioPct => {
            let mut items = subsection(Subsection::Debt);
            items.extend(total_assets());
            items
        }
        RatioKind::RoaPct => {
            let mut items = net_result_inputs();
            items.extend(total_assets());
            items
        }
        RatioKind::RoePct => {
            let mut items = net_result_inputs();
            items.extend(subsection(Subsection::Equity));
            items
        }
        RatioKind::NetMarginPct => {
            let mut items = net_result_inputs();
            items.push(IncomeStatementItem::Revenue.into());
            items
        }
        RatioKind::AssetTurnover => {
            let mut items = total_assets();
            items.push(IncomeStatementItem::Revenue.into());
            items
        }
        RatioKind::InventoryDays => vec![
            BalanceSheetItem::Inventories.into(),
            IncomeStatementItem::Revenue.into(),
        ],
        RatioKind::WorkingCapitalNeed => working_capital_need(),
        RatioKind::NetCashPosition => {
            let mut items = subsection(Subsection::CurrentAssets);
            items.extend(subsection(Subsection::Debt));
            items.extend(working_capital_need());
            items
        }
    };
    items.sort();
    items.dedup();
    items
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Aggregates every ratio draws on, computed once per call. Sums are
/// `None` when they overflowed.
struct Figures {
    current_assets: Option<Money>,
    debt: Option<Money>,
    total_assets: Option<Money>,
    equity: Option<Money>,
    revenue: Money,
    net_result: Option<Money>,
    inventories: Money,
    trade_receivables: Money,
    trade_payables: Money,
}

impl Figures {
    fn from_statements(bs: &BalanceSheet, is: &IncomeStatement, policy: NetResultPolicy) -> Self {
        Self {
            current_assets: bs.subsection_total(Subsection::CurrentAssets),
            debt: bs.subsection_total(Subsection::Debt),
            total_assets: bs.total_assets(),
            equity: bs.subsection_total(Subsection::Equity),
            revenue: is.revenue,
            net_result: net_result(is, policy),
            inventories: bs.get(BalanceSheetItem::Inventories),
            trade_receivables: bs.get(BalanceSheetItem::TradeReceivables),
            trade_payables: bs.get(BalanceSheetItem::TradePayables),
        }
    }

    fn working_capital(&self) -> Option<Money> {
        self.current_assets?.checked_sub(self.debt?)
    }

    fn working_capital_need(&self) -> Option<Money> {
        self.inventories
            .checked_add(self.trade_receivables)?
            .checked_sub(self.trade_payables)
    }

    fn net_cash_position(&self) -> Option<Money> {
        self.working_capital()?.checked_sub(self.working_capital_need()?)
    }
}

enum Outcome {
    Value(RatioValue),
    ZeroDenominator(&'static str),
    Overflow,
}

fn value(amount: Option<Money>) -> Outcome {
    amount
        .map(|v| Outcome::Value(RatioValue::Finite(v)))
        .unwrap_or(Outcome::Overflow)
}

fn divide(numerator: Decimal, denominator: Decimal, scale: Decimal) -> Outcome {
    numerator
        .checked_div(denominator)
        .and_then(|q| q.checked_mul(scale))
        .map(|v| Outcome::Value(RatioValue::Finite(v)))
        .unwrap_or(Outcome::Overflow)
}

struct Builder<'a> {
    profile: &'a AnalysisProfile,
    missing: &'a MissingItems,
    report: &'a mut RatioReport,
}

impl Builder<'_> {
    fn add(&mut self, kind: RatioKind, compute: impl FnOnce() -> Outcome) {
        if !self.profile.includes(kind) {
            return;
        }

        let absent: Vec<String> = dependencies(kind, self.profile.net_result)
            .into_iter()
            .filter(|item| self.missing.contains(item))
            .map(|item| item.to_string())
            .collect();
        if !absent.is_empty() {
            self.report.diagnostics.push(
                Diagnostic::new(
                    Severity::Warning,
                    DiagnosticCode::MissingLineItems,
                    format!("{} omitted: missing {}", kind.label(), absent.join(", ")),
                )
                .about(kind.key()),
            );
            return;
        }

        match compute() {
            Outcome::Value(value) => self.report.ratios.insert(kind, value),
            Outcome::ZeroDenominator(reason) => self.report.diagnostics.push(
                Diagnostic::new(
                    Severity::Info,
                    DiagnosticCode::ZeroDenominator,
                    format!("{} not computable: {reason}", kind.label()),
                )
                .about(kind.key()),
            ),
            Outcome::Overflow => self.report.diagnostics.push(
                Diagnostic::new(
                    Severity::Warning,
                    DiagnosticCode::Overflow,
                    format!("{} overflowed decimal range", kind.label()),
                )
                .about(kind.key()),
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_balance_sheet() -> BalanceSheet {
        let mut bs = BalanceSheet::template();
        bs.set(BalanceSheetItem::TangibleFixedAssets, dec!(100_000));
        bs.set(BalanceSheetItem::Inventories, dec!(20_000));
        bs.set(BalanceSheetItem::TradeReceivables, dec!(25_000));
        bs.set(BalanceSheetItem::Cash, dec!(15_000));
        bs.set(BalanceSheetItem::ShareCapital, dec!(80_000));
        bs.set(BalanceSheetItem::RetainedEarnings, dec!(30_000));
        bs.set(BalanceSheetItem::FinancialDebt, dec!(30_000));
        bs.set(BalanceSheetItem::TradePayables, dec!(20_000));
        bs
    }

    fn sample_income_statement() -> IncomeStatement {
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

    fn finite(set: &RatioSet, kind: RatioKind) -> Decimal {
        set.get(kind).and_then(RatioValue::finite).unwrap()
    }

    #[test]
    fn test_liquidity_scenario() {
        let set = compute_ratios(&sample_balance_sheet(), &sample_income_statement());
        // current assets 60k, debt 50k
        assert_eq!(finite(&set, RatioKind::WorkingCapital), dec!(10_000));
        assert_eq!(finite(&set, RatioKind::CurrentRatio), dec!(1.2));
    }

    #[test]
    fn test_net_result_quirk() {
        // 200k - (80k + 5k + 40k + 50k + 10k + 8k + 5k) = 2k
        let is = sample_income_statement();
        assert_eq!(
            net_result(&is, NetResultPolicy::ChargesExcludingFinancialIncome),
            Some(dec!(2_000))
        );
        assert_eq!(
            net_result(&is, NetResultPolicy::IntermediateBalances),
            Some(dec!(14_000))
        );
    }

    #[test]
    fn test_percentages() {
        let set = compute_ratios(&sample_balance_sheet(), &sample_income_statement());
        // debt 50k / assets 160k
        assert_eq!(finite(&set, RatioKind::DebtRatioPct), dec!(31.25));
        // net 2k / assets 160k
        assert_eq!(finite(&set, RatioKind::RoaPct), dec!(1.25));
        // net 2k / revenue 200k
        assert_eq!(finite(&set, RatioKind::NetMarginPct), dec!(1));
        // revenue 200k / assets 160k
        assert_eq!(finite(&set, RatioKind::AssetTurnover), dec!(1.25));
        // inventories 20k / 200k * 360
        assert_eq!(finite(&set, RatioKind::InventoryDays), dec!(36));
    }

    #[test]
    fn test_working_capital_need_and_net_cash() {
        let set = compute_ratios(&sample_balance_sheet(), &sample_income_statement());
        // 20k + 25k - 20k
        assert_eq!(finite(&set, RatioKind::WorkingCapitalNeed), dec!(25_000));
        assert_eq!(finite(&set, RatioKind::NetCashPosition), dec!(-15_000));
    }

    #[test]
    fn test_zero_debt_gives_infinite_current_ratio() {
        let mut bs = sample_balance_sheet();
        bs.set(BalanceSheetItem::FinancialDebt, Decimal::ZERO);
        bs.set(BalanceSheetItem::TradePayables, Decimal::ZERO);
        let set = compute_ratios(&bs, &sample_income_statement());
        assert_eq!(set.get(RatioKind::CurrentRatio), Some(RatioValue::Infinite));
    }

    #[test]
    fn test_roe_omitted_for_non_positive_equity() {
        let mut bs = sample_balance_sheet();
        bs.set(BalanceSheetItem::ShareCapital, dec!(-30_000));
        let report = compute_ratios_with(
            Some(&bs),
            Some(&sample_income_statement()),
            &AnalysisProfile::default(),
            &MissingItems::new(),
        );
        assert!(!report.ratios.contains(RatioKind::RoePct));
        assert!(report
            .diagnostics
            .iter()
            .any(|d| d.code == DiagnosticCode::ZeroDenominator
                && d.subject.as_deref() == Some("roe_pct")));
    }

    #[test]
    fn test_missing_statement_is_pending() {
        let report = compute_ratios_with(
            Some(&sample_balance_sheet()),
            None,
            &AnalysisProfile::default(),
            &MissingItems::new(),
        );
        assert!(report.ratios.is_empty());
        assert!(report.is_pending());
    }

    #[test]
    fn test_missing_items_omit_only_dependent_ratios() {
        let missing: MissingItems = [LineItem::from(BalanceSheetItem::TradePayables)]
            .into_iter()
            .collect();
        let report = compute_ratios_with(
            Some(&sample_balance_sheet()),
            Some(&sample_income_statement()),
            &AnalysisProfile::default(),
            &missing,
        );
        assert!(!report.ratios.contains(RatioKind::CurrentRatio));
        assert!(!report.ratios.contains(RatioKind::WorkingCapitalNeed));
        assert!(!report.ratios.contains(RatioKind::DebtRatioPct));
        assert!(report.ratios.contains(RatioKind::AssetTurnover));
        assert!(report.ratios.contains(RatioKind::InventoryDays));
        assert!(report
            .diagnostics
            .iter()
            .any(|d| d.code == DiagnosticCode::MissingLineItems));
    }

    #[test]
    fn test_essentials_profile() {
        let report = compute_ratios_with(
            Some(&sample_balance_sheet()),
            Some(&sample_income_statement()),
            &AnalysisProfile::essentials(),
            &MissingItems::new(),
        );
        let kinds: Vec<_> = report.ratios.iter().map(|(k, _)| k).collect();
        assert_eq!(
            kinds,
            vec![RatioKind::WorkingCapital, RatioKind::CurrentRatio, RatioKind::RoaPct]
        );
    }

    #[test]
    fn test_unbalanced_sheet_reported() {
        let mut bs = sample_balance_sheet();
        bs.set(BalanceSheetItem::Cash, dec!(99_999));
        let report = compute_ratios_with(
            Some(&bs),
            Some(&sample_income_statement()),
            &AnalysisProfile::default(),
            &MissingItems::new(),
        );
        assert!(report
            .diagnostics
            .iter()
            .any(|d| d.code == DiagnosticCode::Unbalanced));
        // ratios are still produced
        assert!(report.ratios.contains(RatioKind::CurrentRatio));
    }

    #[test]
    fn test_overflow_omits_only_affected_ratios() {
        let mut bs = sample_balance_sheet();
        bs.set(BalanceSheetItem::Cash, Decimal::MAX);
        bs.set(BalanceSheetItem::Inventories, Decimal::MAX);
        let report = compute_ratios_with(
            Some(&bs),
            Some(&sample_income_statement()),
            &AnalysisProfile::default(),
            &MissingItems::new(),
        );
        assert!(!report.ratios.contains(RatioKind::WorkingCapital));
        assert!(!report.ratios.contains(RatioKind::CurrentRatio));
        assert!(!report.ratios.contains(RatioKind::DebtRatioPct));
        assert!(!report.ratios.contains(RatioKind::NetCashPosition));
        // equity-only and revenue-only ratios survive
        assert!(report.ratios.contains(RatioKind::RoePct));
        assert!(report.ratios.contains(RatioKind::NetMarginPct));
        assert!(report
            .diagnostics
            .iter()
            .any(|d| d.code == DiagnosticCode::Overflow
                && d.subject.as_deref() == Some("current_ratio")));
    }

    #[test]
    fn test_dependencies_follow_policy() {
        let quirk = dependencies(
            RatioKind::RoaPct,
            NetResultPolicy::ChargesExcludingFinancialIncome,
        );
        assert!(!quirk.contains(&LineItem::from(IncomeStatementItem::FinancialIncome)));
        assert!(quirk.contains(&LineItem::from(IncomeStatementItem::TaxesAndDuties)));

        let cascade = dependencies(RatioKind::RoaPct, NetResultPolicy::IntermediateBalances);
        assert!(cascade.contains(&LineItem::from(IncomeStatementItem::FinancialIncome)));
        assert!(!cascade.contains(&LineItem::from(IncomeStatementItem::TaxesAndDuties)));
    }
}
