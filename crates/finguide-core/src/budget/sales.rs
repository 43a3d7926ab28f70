use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::{checked, month_name, MONTHS_IN_YEAR};
use crate::error::FinGuideError;
use crate::types::{checked_sum, with_metadata, ComputationOutput, Money, Percent};
use crate::FinGuideResult;

const MOVING_AVERAGE_WINDOW: usize = 3;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesBudgetInput {
    /// Forecast sales, January first. Exactly twelve values.
    pub monthly_sales: Vec<Money>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesMonth {
    pub month: String,
    pub forecast: Money,
    pub cumulative: Money,
    /// `None` for January and after a zero month.
    pub variation_pct: Option<Percent>,
    /// `None` until three months are available.
    pub moving_average_3m: Option<Money>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesBudgetOutput {
    pub months: Vec<SalesMonth>,
    pub annual_total: Money,
    pub monthly_average: Money,
}

pub fn sales_budget(
    input: &SalesBudgetInput,
) -> FinGuideResult<ComputationOutput<SalesBudgetOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.monthly_sales.len() != MONTHS_IN_YEAR {
        return Err(FinGuideError::InvalidInput {
            field: "monthly_sales".to_string(),
            reason: format!(
                "Expected {MONTHS_IN_YEAR} monthly values, got {}",
                input.monthly_sales.len()
            ),
        });
    }
    if let Some(i) = input.monthly_sales.iter().position(|v| *v < Decimal::ZERO) {
        return Err(FinGuideError::InvalidInput {
            field: format!("monthly_sales[{i}]"),
            reason: "Forecast sales cannot be negative".to_string(),
        });
    }

    let sales = &input.monthly_sales;
    let mut cumulative = Decimal::ZERO;
    let mut months = Vec::with_capacity(MONTHS_IN_YEAR);

    for (i, &forecast) in sales.iter().enumerate() {
        cumulative = checked(cumulative.checked_add(forecast), "cumulative sales")?;

        let variation_pct = match i.checked_sub(1).map(|p| sales[p]) {
            Some(prior) if !prior.is_zero() => Some(checked(
                forecast
                    .checked_sub(prior)
                    .and_then(|delta| delta.checked_div(prior))
                    .and_then(|ratio| ratio.checked_mul(dec!(100))),
                "month-over-month variation",
            )?),
            _ => None,
        };

        let moving_average_3m = if i + 1 >= MOVING_AVERAGE_WINDOW {
            let window = &sales[i + 1 - MOVING_AVERAGE_WINDOW..=i];
            let total = checked(checked_sum(window.iter().copied()), "moving average")?;
            Some(total / Decimal::from(MOVING_AVERAGE_WINDOW as u32))
        } else {
            None
        };

        months.push(SalesMonth {
            month: month_name(i),
            forecast,
            cumulative,
            variation_pct,
            moving_average_3m,
        });
    }

    if cumulative.is_zero() {
        warnings.push("Forecast sales are zero for the whole year.".into());
    }

    let output = SalesBudgetOutput {
        months,
        annual_total: cumulative,
        monthly_average: cumulative / Decimal::from(MONTHS_IN_YEAR as u32),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "moving_average_window_months": MOVING_AVERAGE_WINDOW,
        "variation_basis": "previous month",
    });

    Ok(with_metadata(
        "Monthly sales budget",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}
