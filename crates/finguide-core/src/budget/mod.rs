//! Twelve-month planning tools: sales budget, cash budget and what-if
//! scenarios.

pub mod cash;
pub mod sales;
pub mod what_if;

pub use cash::{cash_budget, CashBudgetInput, CashBudgetOutput, CashMonth, DEFAULT_SEASONALITY};
pub use sales::{sales_budget, SalesBudgetInput, SalesBudgetOutput, SalesMonth};
pub use what_if::{
    what_if, Scenario, ScenarioResult, SensitivityCell, WhatIfInput, WhatIfOutput,
};

use chrono::Month;
use rust_decimal::Decimal;

use crate::error::FinGuideError;
use crate::FinGuideResult;

pub const MONTHS_IN_YEAR: usize = 12;

/// Result of a checked decimal operation, or an overflow error naming `context`.
pub(crate) fn checked(value: Option<Decimal>, context: &str) -> FinGuideResult<Decimal> {
    value.ok_or_else(|| FinGuideError::Overflow {
        context: context.to_string(),
    })
}

/// English month name for a zero-based month index.
pub(crate) fn month_name(index: usize) -> String {
    u8::try_from(index + 1)
        .ok()
        .and_then(|n| Month::try_from(n).ok())
        .map(|m| m.name().to_string())
        .unwrap_or_else(|| format!("Month {}", index + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_names() {
        assert_eq!(month_name(0), "January");
        assert_eq!(month_name(11), "December");
        assert_eq!(month_name(12), "Month 13");
    }

    #[test]
    fn test_checked_names_the_overflow() {
        assert_eq!(checked(Some(Decimal::ONE), "total").unwrap(), Decimal::ONE);
        match checked(Decimal::MAX.checked_add(Decimal::ONE), "annual total") {
            Err(FinGuideError::Overflow { context }) => assert_eq!(context, "annual total"),
            other => panic!("Expected Overflow, got {other:?}"),
        }
    }
}
