use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::statements::{IncomeStatement, IncomeStatementItem};
use crate::types::Money;

/// The six intermediate management balances, in cascade order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceKind {
    CommercialMargin,
    ValueAdded,
    /// Gross operating surplus (EBITDA-equivalent).
    Ebe,
    OperatingResult,
    OrdinaryResult,
    NetResult,
}

impl BalanceKind {
    pub const ALL: [BalanceKind; 6] = [
        Self::CommercialMargin,
        Self::ValueAdded,
        Self::Ebe,
        Self::OperatingResult,
        Self::OrdinaryResult,
        Self::NetResult,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::CommercialMargin => "commercial_margin",
            Self::ValueAdded => "value_added",
            Self::Ebe => "ebe",
            Self::OperatingResult => "operating_result",
            Self::OrdinaryResult => "ordinary_result",
            Self::NetResult => "net_result",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::CommercialMargin => "Commercial margin",
            Self::ValueAdded => "Value added",
            Self::Ebe => "EBE (gross operating surplus)",
            Self::OperatingResult => "Operating result",
            Self::OrdinaryResult => "Ordinary result",
            Self::NetResult => "Net result",
        }
    }

    /// Human-readable formula, relative to the previous balance.
    pub fn formula(self) -> &'static str {
        match self {
            Self::CommercialMargin => "Revenue - Purchases of goods + Inventory variation",
            Self::ValueAdded => "Commercial margin - Other external expenses",
            Self::Ebe => "Value added - Personnel expenses",
            Self::OperatingResult => "EBE - Depreciation expense",
            Self::OrdinaryResult => "Operating result + Financial income - Financial expenses",
            Self::NetResult => "Ordinary result - Income tax expense",
        }
    }

    /// Raw income-statement inputs this step needs, including those of
    /// every earlier step.
    pub fn inputs(self) -> Vec<IncomeStatementItem> {
        use IncomeStatementItem::*;
        let steps: [&[IncomeStatementItem]; 6] = [
            &[Revenue, PurchasesOfGoods, InventoryVariation],
            &[OtherExternalExpenses],
            &[PersonnelExpenses],
            &[DepreciationExpense],
            &[FinancialIncome, FinancialExpenses],
            &[IncomeTaxExpense],
        ];
        let upto = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        steps[..=upto].iter().flat_map(|s| s.iter().copied()).collect()
    }
}

/// Intermediate management balances (SIG). Each field is a running
/// adjustment of the previous one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntermediateBalances {
    pub commercial_margin: Money,
    pub value_added: Money,
    pub ebe: Money,
    pub operating_result: Money,
    pub ordinary_result: Money,
    pub net_result: Money,
}

impl IntermediateBalances {
    pub fn get(&self, kind: BalanceKind) -> Money {
        match kind {
            BalanceKind::CommercialMargin => self.commercial_margin,
            BalanceKind::ValueAdded => self.value_added,
            BalanceKind::Ebe => self.ebe,
            BalanceKind::OperatingResult => self.operating_result,
            BalanceKind::OrdinaryResult => self.ordinary_result,
            BalanceKind::NetResult => self.net_result,
        }
    }

    /// Balances in cascade order.
    pub fn iter(&self) -> impl Iterator<Item = (BalanceKind, Money)> + '_ {
        BalanceKind::ALL.into_iter().map(move |k| (k, self.get(k)))
    }
}

/// Compute the SIG cascade from an income statement.
///
/// A company with no revenue (revenue <= 0) reports a zero commercial
/// margin whatever its purchases; every later step still applies.
/// Taxes and duties and other expenses do not enter the cascade.
/// Returns `None` when a step leaves the decimal range.
pub fn compute_intermediate_balances(
    income_statement: &IncomeStatement,
) -> Option<IntermediateBalances> {
    let is = income_statement;

    let commercial_margin = if is.revenue > Decimal::ZERO {
        is.revenue
            .checked_sub(is.purchases_of_goods)?
            .checked_add(is.inventory_variation)?
    } else {
        Decimal::ZERO
    };
    let value_added = commercial_margin.checked_sub(is.other_external_expenses)?;
    let ebe = value_added.checked_sub(is.personnel_expenses)?;
    let operating_result = ebe.checked_sub(is.depreciation_expense)?;
    let ordinary_result = operating_result
        .checked_add(is.financial_income)?
        .checked_sub(is.financial_expenses)?;
    let net_result = ordinary_result.checked_sub(is.income_tax_expense)?;

    debug!(%commercial_margin, %net_result, "intermediate balances computed");

    Some(IntermediateBalances {
        commercial_margin,
        value_added,
        ebe,
        operating_result,
        ordinary_result,
        net_result,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
