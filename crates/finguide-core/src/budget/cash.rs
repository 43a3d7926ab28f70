use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::{checked, month_name, MONTHS_IN_YEAR};
use crate::error::FinGuideError;
use crate::types::{checked_sum, with_metadata, ComputationOutput, Money, Percent};
use crate::FinGuideResult;

/// Monthly multipliers applied to collected revenue, January first.
pub const DEFAULT_SEASONALITY: [Decimal; 12] = [
    dec!(1.0),
    dec!(0.9),
    dec!(1.1),
    dec!(1.0),
    dec!(1.2),
    dec!(1.1),
    dec!(0.8),
    dec!(0.7),
    dec!(1.0),
    dec!(1.3),
    dec!(1.4),
    dec!(1.5),
];

/// Outflows grow by this step within each quarter (0%, 10%, 20%).
const QUARTERLY_OUTFLOW_STEP: Decimal = dec!(0.1);

const MIN_CREDIT_LINE: Money = dec!(5000);
const CREDIT_LINE_BUFFER: Decimal = dec!(1.2);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashBudgetInput {
    /// Average revenue actually collected each month
    pub collected_revenue: Money,
    /// Grants, capital contributions and similar
    #[serde(default)]
    pub other_inflows: Money,
    pub purchases: Money,
    pub personnel_expenses: Money,
    #[serde(default)]
    pub other_charges: Money,
    /// Twelve multipliers; defaults to [`DEFAULT_SEASONALITY`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seasonality: Option<Vec<Decimal>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashMonth {
    pub month: String,
    pub inflows: Money,
    pub outflows: Money,
    pub net_flow: Money,
    pub cumulative: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashBudgetOutput {
    pub months: Vec<CashMonth>,
    pub minimum_balance: Money,
    pub in_deficit: bool,
    /// Only when the cumulative balance goes negative
    pub suggested_credit_line: Option<Money>,
    /// Share of collected revenue that could be lost without a deficit
    pub safety_margin_pct: Option<Percent>,
}

pub fn cash_budget(
    input: &CashBudgetInput,
) -> FinGuideResult<ComputationOutput<CashBudgetOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let amounts = [
        ("collected_revenue", input.collected_revenue),
        ("other_inflows", input.other_inflows),
        ("purchases", input.purchases),
        ("personnel_expenses", input.personnel_expenses),
        ("other_charges", input.other_charges),
    ];
    for (field, value) in amounts {
        if value < Decimal::ZERO {
            return Err(FinGuideError::InvalidInput {
                field: field.to_string(),
                reason: "Amount cannot be negative".to_string(),
            });
        }
    }

    let seasonality: &[Decimal] = match input.seasonality.as_deref() {
        Some(s) if s.len() != MONTHS_IN_YEAR => {
            return Err(FinGuideError::InvalidInput {
                field: "seasonality".to_string(),
                reason: format!("Expected {MONTHS_IN_YEAR} coefficients, got {}", s.len()),
            });
        }
        Some(s) if s.iter().any(|c| *c < Decimal::ZERO) => {
            return Err(FinGuideError::InvalidInput {
                field: "seasonality".to_string(),
                reason: "Seasonality coefficients cannot be negative".to_string(),
            });
        }
        Some(s) => s,
        None => &DEFAULT_SEASONALITY,
    };

    let base_outflows = checked(
        checked_sum([input.purchases, input.personnel_expenses, input.other_charges]),
        "monthly outflows",
    )?;
    let mut cumulative = Decimal::ZERO;
    let mut months = Vec::with_capacity(MONTHS_IN_YEAR);

    for (i, coefficient) in seasonality.iter().copied().enumerate() {
        let inflows = checked(
            input
                .collected_revenue
                .checked_mul(coefficient)
                .and_then(|v| v.checked_add(input.other_inflows)),
            "monthly inflows",
        )?;
        let step = Decimal::from((i % 3) as u32) * QUARTERLY_OUTFLOW_STEP;
        let outflows = checked(
            base_outflows.checked_mul(Decimal::ONE + step),
            "monthly outflows",
        )?;
        let net_flow = checked(inflows.checked_sub(outflows), "net cash flow")?;
        cumulative = checked(cumulative.checked_add(net_flow), "cumulative cash")?;
        months.push(CashMonth {
            month: month_name(i),
            inflows,
            outflows,
            net_flow,
            cumulative,
        });
    }

    let minimum_balance = months
        .iter()
        .map(|m| m.cumulative)
        .min()
        .unwrap_or(Decimal::ZERO);
    let in_deficit = minimum_balance < Decimal::ZERO;

    let suggested_credit_line = if in_deficit {
        warnings.push(format!(
            "Cumulative cash falls to {minimum_balance}; a credit line is advisable."
        ));
        let line = checked(
            (-minimum_balance).checked_mul(CREDIT_LINE_BUFFER),
            "suggested credit line",
        )?;
        Some(line.max(MIN_CREDIT_LINE))
    } else {
        None
    };

    let safety_margin_pct = if !in_deficit && !input.collected_revenue.is_zero() {
        Some(checked(
            minimum_balance
                .checked_div(input.collected_revenue)
                .and_then(|v| v.checked_mul(dec!(100))),
            "safety margin",
        )?)
    } else {
        None
    };

    let output = CashBudgetOutput {
        months,
        minimum_balance,
        in_deficit,
        suggested_credit_line,
        safety_margin_pct,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "opening_balance": "0",
        "outflow_drift": "+0%/+10%/+20% by month within each quarter",
        "credit_line": "max(5000, 1.2 x deepest deficit)",
    });

    Ok(with_metadata(
        "Twelve-month cash budget with seasonal inflows",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}
