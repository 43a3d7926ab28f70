use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{checked_sum, Money};

// ---------------------------------------------------------------------------
// Template structure
// ---------------------------------------------------------------------------

/// Top-level balance-sheet section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Assets,
    Liabilities,
}

impl Section {
    pub const ALL: [Section; 2] = [Section::Assets, Section::Liabilities];

    pub fn label(self) -> &'static str {
        match self {
            Self::Assets => "Assets",
            Self::Liabilities => "Liabilities",
        }
    }

    pub fn subsections(self) -> [Subsection; 2] {
        match self {
            Self::Assets => [Subsection::FixedAssets, Subsection::CurrentAssets],
            Self::Liabilities => [Subsection::Equity, Subsection::Debt],
        }
    }
}

/// Named subsection within a [`Section`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subsection {
    FixedAssets,
    CurrentAssets,
    Equity,
    Debt,
}

impl Subsection {
    pub const ALL: [Subsection; 4] = [
        Subsection::FixedAssets,
        Subsection::CurrentAssets,
        Subsection::Equity,
        Subsection::Debt,
    ];

    pub fn section(self) -> Section {
        match self {
            Self::FixedAssets | Self::CurrentAssets => Section::Assets,
            Self::Equity | Self::Debt => Section::Liabilities,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::FixedAssets => "Fixed assets",
            Self::CurrentAssets => "Current assets",
            Self::Equity => "Equity",
            Self::Debt => "Debt",
        }
    }

    /// Line items of this subsection, in template order.
    pub fn items(self) -> impl Iterator<Item = BalanceSheetItem> {
        BalanceSheetItem::ALL
            .into_iter()
            .filter(move |item| item.subsection() == self)
    }
}

/// Every balance-sheet line item, in template-declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceSheetItem {
    IntangibleFixedAssets,
    TangibleFixedAssets,
    FinancialFixedAssets,
    Inventories,
    TradeReceivables,
    Cash,
    OtherCurrentAssets,
    ShareCapital,
    RetainedEarnings,
    NetIncomeForPeriod,
    FinancialDebt,
    TradePayables,
    OtherLiabilities,
}

impl BalanceSheetItem {
    pub const ALL: [BalanceSheetItem; 13] = [
        Self::IntangibleFixedAssets,
        Self::TangibleFixedAssets,
        Self::FinancialFixedAssets,
        Self::Inventories,
        Self::TradeReceivables,
        Self::Cash,
        Self::OtherCurrentAssets,
        Self::ShareCapital,
        Self::RetainedEarnings,
        Self::NetIncomeForPeriod,
        Self::FinancialDebt,
        Self::TradePayables,
        Self::OtherLiabilities,
    ];

    pub fn subsection(self) -> Subsection {
        match self {
            Self::IntangibleFixedAssets
            | Self::TangibleFixedAssets
            | Self::FinancialFixedAssets => Subsection::FixedAssets,
            Self::Inventories | Self::TradeReceivables | Self::Cash | Self::OtherCurrentAssets => {
                Subsection::CurrentAssets
            }
            Self::ShareCapital | Self::RetainedEarnings | Self::NetIncomeForPeriod => {
                Subsection::Equity
            }
            Self::FinancialDebt | Self::TradePayables | Self::OtherLiabilities => Subsection::Debt,
        }
    }

    pub fn section(self) -> Section {
        self.subsection().section()
    }

    /// Stable machine key, identical to the serde field name.
    pub fn key(self) -> &'static str {
        match self {
            Self::IntangibleFixedAssets => "intangible_fixed_assets",
            Self::TangibleFixedAssets => "tangible_fixed_assets",
            Self::FinancialFixedAssets => "financial_fixed_assets",
            Self::Inventories => "inventories",
            Self::TradeReceivables => "trade_receivables",
            Self::Cash => "cash",
            Self::OtherCurrentAssets => "other_current_assets",
            Self::ShareCapital => "share_capital",
            Self::RetainedEarnings => "retained_earnings",
            Self::NetIncomeForPeriod => "net_income_for_period",
            Self::FinancialDebt => "financial_debt",
            Self::TradePayables => "trade_payables",
            Self::OtherLiabilities => "other_liabilities",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::IntangibleFixedAssets => "Intangible fixed assets",
            Self::TangibleFixedAssets => "Tangible fixed assets",
            Self::FinancialFixedAssets => "Financial fixed assets",
            Self::Inventories => "Inventories",
            Self::TradeReceivables => "Trade receivables",
            Self::Cash => "Cash",
            Self::OtherCurrentAssets => "Other current assets",
            Self::ShareCapital => "Share capital",
            Self::RetainedEarnings => "Retained earnings",
            Self::NetIncomeForPeriod => "Net income for the period",
            Self::FinancialDebt => "Financial debt",
            Self::TradePayables => "Trade payables",
            Self::OtherLiabilities => "Other liabilities",
        }
    }

    /// Resolve a key or display label (case-insensitive).
    pub fn lookup(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|item| {
            item.key().eq_ignore_ascii_case(name) || item.label().eq_ignore_ascii_case(name)
        })
    }
}

// ---------------------------------------------------------------------------
// Balance sheet records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedAssets {
    pub intangible_fixed_assets: Money,
    pub tangible_fixed_assets: Money,
    pub financial_fixed_assets: Money,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentAssets {
    pub inventories: Money,
    pub trade_receivables: Money,
    pub cash: Money,
    pub other_current_assets: Money,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assets {
    pub fixed_assets: FixedAssets,
    pub current_assets: CurrentAssets,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equity {
    pub share_capital: Money,
    pub retained_earnings: Money,
    pub net_income_for_period: Money,
}

/// All debts. The analysis treats the whole subsection as short-term
/// ("current liabilities").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Debt {
    pub financial_debt: Money,
    pub trade_payables: Money,
    pub other_liabilities: Money,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Liabilities {
    pub equity: Equity,
    pub debt: Debt,
}

/// Balance sheet with the fixed section → subsection → line-item hierarchy.
///
/// `Default` is the zero-filled template. Totals are derived on demand; an
/// imbalance between assets and liabilities is allowed and reported by
/// [`BalanceSheet::imbalance`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheet {
    pub assets: Assets,
    pub liabilities: Liabilities,
}

impl BalanceSheet {
    /// Zero-filled template.
    pub fn template() -> Self {
        Self::default()
    }

    pub fn get(&self, item: BalanceSheetItem) -> Money {
        *self.slot(item)
    }

    pub fn set(&mut self, item: BalanceSheetItem, amount: Money) {
        *self.slot_mut(item) = amount;
    }

    /// Line items with their amounts, in template order.
    pub fn items(&self) -> impl Iterator<Item = (BalanceSheetItem, Money)> + '_ {
        BalanceSheetItem::ALL
            .into_iter()
            .map(move |item| (item, self.get(item)))
    }

    /// Sum of a subsection's items. Totals are `None` only when the sum
    /// leaves the decimal range.
    pub fn subsection_total(&self, subsection: Subsection) -> Option<Money> {
        checked_sum(subsection.items().map(|item| self.get(item)))
    }

    pub fn section_total(&self, section: Section) -> Option<Money> {
        section
            .subsections()
            .into_iter()
            .try_fold(Decimal::ZERO, |total, sub| {
                total.checked_add(self.subsection_total(sub)?)
            })
    }

    pub fn total_assets(&self) -> Option<Money> {
        self.section_total(Section::Assets)
    }

    pub fn total_liabilities(&self) -> Option<Money> {
        self.section_total(Section::Liabilities)
    }

    /// Total assets minus total liabilities; zero when the sheet balances.
    pub fn imbalance(&self) -> Option<Money> {
        self.total_assets()?.checked_sub(self.total_liabilities()?)
    }

    pub fn is_balanced(&self) -> bool {
        self.imbalance() == Some(Decimal::ZERO)
    }

    fn slot(&self, item: BalanceSheetItem) -> &Money {
        let fixed = &self.assets.fixed_assets;
        let current = &self.assets.current_assets;
        let equity = &self.liabilities.equity;
        let debt = &self.liabilities.debt;
        match item {
            BalanceSheetItem::IntangibleFixedAssets => &fixed.intangible_fixed_assets,
            BalanceSheetItem::TangibleFixedAssets => &fixed.tangible_fixed_assets,
            BalanceSheetItem::FinancialFixedAssets => &fixed.financial_fixed_assets,
            BalanceSheetItem::Inventories => &current.inventories,
            BalanceSheetItem::TradeReceivables => &current.trade_receivables,
            BalanceSheetItem::Cash => &current.cash,
            BalanceSheetItem::OtherCurrentAssets => &current.other_current_assets,
            BalanceSheetItem::ShareCapital => &equity.share_capital,
            BalanceSheetItem::RetainedEarnings => &equity.retained_earnings,
            BalanceSheetItem::NetIncomeForPeriod => &equity.net_income_for_period,
            BalanceSheetItem::FinancialDebt => &debt.financial_debt,
            BalanceSheetItem::TradePayables => &debt.trade_payables,
            BalanceSheetItem::OtherLiabilities => &debt.other_liabilities,
        }
    }

    fn slot_mut(&mut self, item: BalanceSheetItem) -> &mut Money {
        let Self {
            assets,
            liabilities,
        } = self;
        let fixed = &mut assets.fixed_assets;
        let current = &mut assets.current_assets;
        let equity = &mut liabilities.equity;
        let debt = &mut liabilities.debt;
        match item {
            BalanceSheetItem::IntangibleFixedAssets => &mut fixed.intangible_fixed_assets,
            BalanceSheetItem::TangibleFixedAssets => &mut fixed.tangible_fixed_assets,
            BalanceSheetItem::FinancialFixedAssets => &mut fixed.financial_fixed_assets,
            BalanceSheetItem::Inventories => &mut current.inventories,
            BalanceSheetItem::TradeReceivables => &mut current.trade_receivables,
            BalanceSheetItem::Cash => &mut current.cash,
            BalanceSheetItem::OtherCurrentAssets => &mut current.other_current_assets,
            BalanceSheetItem::ShareCapital => &mut equity.share_capital,
            BalanceSheetItem::RetainedEarnings => &mut equity.retained_earnings,
            BalanceSheetItem::NetIncomeForPeriod => &mut equity.net_income_for_period,
            BalanceSheetItem::FinancialDebt => &mut debt.financial_debt,
            BalanceSheetItem::TradePayables => &mut debt.trade_payables,
            BalanceSheetItem::OtherLiabilities => &mut debt.other_liabilities,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
