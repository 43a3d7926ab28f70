use serde::{Deserialize, Serialize};

use crate::types::{checked_sum, Money};

/// Income-statement line items, in template-declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeStatementItem {
    Revenue,
    PurchasesOfGoods,
    InventoryVariation,
    OtherExternalExpenses,
    TaxesAndDuties,
    PersonnelExpenses,
    DepreciationExpense,
    OtherExpenses,
    FinancialIncome,
    FinancialExpenses,
    IncomeTaxExpense,
}

impl IncomeStatementItem {
    pub const ALL: [IncomeStatementItem; 11] = [
        Self::Revenue,
        Self::PurchasesOfGoods,
        Self::InventoryVariation,
        Self::OtherExternalExpenses,
        Self::TaxesAndDuties,
        Self::PersonnelExpenses,
        Self::DepreciationExpense,
        Self::OtherExpenses,
        Self::FinancialIncome,
        Self::FinancialExpenses,
        Self::IncomeTaxExpense,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Revenue => "revenue",
            Self::PurchasesOfGoods => "purchases_of_goods",
            Self::InventoryVariation => "inventory_variation",
            Self::OtherExternalExpenses => "other_external_expenses",
            Self::TaxesAndDuties => "taxes_and_duties",
            Self::PersonnelExpenses => "personnel_expenses",
            Self::DepreciationExpense => "depreciation_expense",
            Self::OtherExpenses => "other_expenses",
            Self::FinancialIncome => "financial_income",
            Self::FinancialExpenses => "financial_expenses",
            Self::IncomeTaxExpense => "income_tax_expense",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Revenue => "Revenue",
            Self::PurchasesOfGoods => "Purchases of goods",
            Self::InventoryVariation => "Inventory variation",
            Self::OtherExternalExpenses => "Other external expenses",
            Self::TaxesAndDuties => "Taxes and duties",
            Self::PersonnelExpenses => "Personnel expenses",
            Self::DepreciationExpense => "Depreciation expense",
            Self::OtherExpenses => "Other expenses",
            Self::FinancialIncome => "Financial income",
            Self::FinancialExpenses => "Financial expenses",
            Self::IncomeTaxExpense => "Income tax expense",
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

/// Flat income statement. `Default` is the zero-filled template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeStatement {
    pub revenue: Money,
    pub purchases_of_goods: Money,
    /// Positive when inventory decreased over the period.
    pub inventory_variation: Money,
    pub other_external_expenses: Money,
    pub taxes_and_duties: Money,
    pub personnel_expenses: Money,
    pub depreciation_expense: Money,
    pub other_expenses: Money,
    pub financial_income: Money,
    pub financial_expenses: Money,
    pub income_tax_expense: Money,
}

impl IncomeStatement {
    pub fn template() -> Self {
        Self::default()
    }

    pub fn get(&self, item: IncomeStatementItem) -> Money {
        match item {
            IncomeStatementItem::Revenue => self.revenue,
            IncomeStatementItem::PurchasesOfGoods => self.purchases_of_goods,
            IncomeStatementItem::InventoryVariation => self.inventory_variation,
            IncomeStatementItem::OtherExternalExpenses => self.other_external_expenses,
            IncomeStatementItem::TaxesAndDuties => self.taxes_and_duties,
            IncomeStatementItem::PersonnelExpenses => self.personnel_expenses,
            IncomeStatementItem::DepreciationExpense => self.depreciation_expense,
            IncomeStatementItem::OtherExpenses => self.other_expenses,
            IncomeStatementItem::FinancialIncome => self.financial_income,
            IncomeStatementItem::FinancialExpenses => self.financial_expenses,
            IncomeStatementItem::IncomeTaxExpense => self.income_tax_expense,
        }
    }

    pub fn set(&mut self, item: IncomeStatementItem, amount: Money) {
        let slot = match item {
            IncomeStatementItem::Revenue => &mut self.revenue,
            IncomeStatementItem::PurchasesOfGoods => &mut self.purchases_of_goods,
            IncomeStatementItem::InventoryVariation => &mut self.inventory_variation,
            IncomeStatementItem::OtherExternalExpenses => &mut self.other_external_expenses,
            IncomeStatementItem::TaxesAndDuties => &mut self.taxes_and_duties,
            IncomeStatementItem::PersonnelExpenses => &mut self.personnel_expenses,
            IncomeStatementItem::DepreciationExpense => &mut self.depreciation_expense,
            IncomeStatementItem::OtherExpenses => &mut self.other_expenses,
            IncomeStatementItem::FinancialIncome => &mut self.financial_income,
            IncomeStatementItem::FinancialExpenses => &mut self.financial_expenses,
            IncomeStatementItem::IncomeTaxExpense => &mut self.income_tax_expense,
        };
        *slot = amount;
    }

    pub fn items(&self) -> impl Iterator<Item = (IncomeStatementItem, Money)> + '_ {
        IncomeStatementItem::ALL
            .into_iter()
            .map(move |item| (item, self.get(item)))
    }

    /// Sum of every line except revenue and financial income.
    ///
    /// Inventory variation is included as a charge here even though the
    /// intermediate-balance cascade adds it back. `None` on overflow.
    pub fn charges_excluding_financial_income(&self) -> Option<Money> {
        checked_sum(
            self.items()
                .filter(|(item, _)| {
                    !matches!(
                        item,
                        IncomeStatementItem::Revenue | IncomeStatementItem::FinancialIncome
                    )
                })
                .map(|(_, amount)| amount),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_template_all_zero() {
        let is = IncomeStatement::template();
        assert!(is.items().all(|(_, v)| v == Decimal::ZERO));
        assert_eq!(is.items().count(), 11);
    }

    #[test]
    fn test_set_get_round() {
        let mut is = IncomeStatement::template();
        for (i, item) in IncomeStatementItem::ALL.into_iter().enumerate() {
            is.set(item, Decimal::from(i as i64 * 10));
        }
        for (i, item) in IncomeStatementItem::ALL.into_iter().enumerate() {
            assert_eq!(is.get(item), Decimal::from(i as i64 * 10));
        }
    }

    #[test]
    fn test_charges_skip_revenue_and_financial_income() {
        let is = IncomeStatement {
            revenue: dec!(1_000),
            purchases_of_goods: dec!(100),
            inventory_variation: dec!(10),
            financial_income: dec!(50),
            financial_expenses: dec!(20),
            ..IncomeStatement::template()
        };
        assert_eq!(is.charges_excluding_financial_income(), Some(dec!(130)));
    }

    #[test]
    fn test_charges_overflow_is_none() {
        let is = IncomeStatement {
            personnel_expenses: Decimal::MAX,
            other_expenses: Decimal::MAX,
            ..IncomeStatement::template()
        };
        assert_eq!(is.charges_excluding_financial_income(), None);
    }
}
