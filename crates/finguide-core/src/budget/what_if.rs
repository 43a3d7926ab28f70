use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::checked;
use crate::error::FinGuideError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::FinGuideResult;

const DEFAULT_FIXED_COSTS: Money = dec!(150000);

const SENSITIVITY_REVENUE_PCT: [Decimal; 5] = [dec!(-20), dec!(-10), dec!(0), dec!(10), dec!(20)];
const SENSITIVITY_MARGIN_PTS: [Decimal; 5] = [dec!(-5), dec!(-2.5), dec!(0), dec!(2.5), dec!(5)];

fn default_fixed_costs() -> Money {
    DEFAULT_FIXED_COSTS
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    Pessimistic,
    Realistic,
    Optimistic,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [Self::Pessimistic, Self::Realistic, Self::Optimistic];

    pub fn label(self) -> &'static str {
        match self {
            Self::Pessimistic => "Pessimistic",
            Self::Realistic => "Realistic",
            Self::Optimistic => "Optimistic",
        }
    }

    /// (revenue, margin rate, fixed costs) multipliers.
    fn multipliers(self) -> (Decimal, Decimal, Decimal) {
        match self {
            Self::Pessimistic => (dec!(0.8), dec!(0.9), dec!(1.2)),
            Self::Realistic => (Decimal::ONE, Decimal::ONE, Decimal::ONE),
            Self::Optimistic => (dec!(1.2), dec!(1.1), dec!(0.9)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhatIfInput {
    pub base_revenue: Money,
    /// Margin on variable costs, in percent of revenue
    pub margin_rate_pct: Percent,
    /// Overall revenue change applied to every scenario
    #[serde(default)]
    pub revenue_change_pct: Percent,
    #[serde(default)]
    pub fixed_cost_change_pct: Percent,
    #[serde(default = "default_fixed_costs")]
    pub base_fixed_costs: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario: Scenario,
    pub revenue: Money,
    pub gross_margin: Money,
    pub fixed_costs: Money,
    pub result: Money,
    /// `None` when revenue is zero or negative
    pub net_margin_pct: Option<Percent>,
}

/// Result at one (revenue change, margin change) point of the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensitivityCell {
    pub revenue_change_pct: Percent,
    pub margin_change_pts: Percent,
    pub result: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhatIfOutput {
    pub scenarios: Vec<ScenarioResult>,
    pub sensitivity: Vec<SensitivityCell>,
}

impl WhatIfOutput {
    pub fn scenario(&self, scenario: Scenario) -> Option<&ScenarioResult> {
        self.scenarios.iter().find(|s| s.scenario == scenario)
    }
}

pub fn what_if(input: &WhatIfInput) -> FinGuideResult<ComputationOutput<WhatIfOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate(input)?;

    let scenarios = Scenario::ALL
        .into_iter()
        .map(|scenario| scenario_result(input, scenario))
        .collect::<FinGuideResult<Vec<_>>>()?;

    if scenarios
        .iter()
        .any(|s| s.scenario == Scenario::Realistic && s.result < Decimal::ZERO)
    {
        warnings.push("The realistic scenario is loss-making.".into());
    }

    let mut sensitivity =
        Vec::with_capacity(SENSITIVITY_REVENUE_PCT.len() * SENSITIVITY_MARGIN_PTS.len());
    for revenue_change_pct in SENSITIVITY_REVENUE_PCT {
        for margin_change_pts in SENSITIVITY_MARGIN_PTS {
            let revenue = checked(
                adjust(input.base_revenue, Decimal::ONE, revenue_change_pct),
                "sensitivity revenue",
            )?;
            let result = checked(
                percent_of(revenue, input.margin_rate_pct + margin_change_pts)
                    .and_then(|margin| margin.checked_sub(input.base_fixed_costs)),
                "sensitivity result",
            )?;
            sensitivity.push(SensitivityCell {
                revenue_change_pct,
                margin_change_pts,
                result,
            });
        }
    }

    let output = WhatIfOutput {
        scenarios,
        sensitivity,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "pessimistic": "revenue x0.8, margin x0.9, fixed costs x1.2",
        "optimistic": "revenue x1.2, margin x1.1, fixed costs x0.9",
        "sensitivity_fixed_costs": input.base_fixed_costs,
    });

    Ok(with_metadata(
        "Three-scenario profitability simulation",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

/// `amount * multiplier * (1 + change_pct / 100)`, `None` on overflow.
fn adjust(amount: Money, multiplier: Decimal, change_pct: Percent) -> Option<Money> {
    amount
        .checked_mul(multiplier)?
        .checked_mul(Decimal::ONE + change_pct / dec!(100))
}

fn percent_of(amount: Money, pct: Percent) -> Option<Money> {
    amount.checked_mul(pct)?.checked_div(dec!(100))
}

fn scenario_result(input: &WhatIfInput, scenario: Scenario) -> FinGuideResult<ScenarioResult> {
    let (revenue_mult, margin_mult, cost_mult) = scenario.multipliers();
    let revenue = checked(
        adjust(input.base_revenue, revenue_mult, input.revenue_change_pct),
        "scenario revenue",
    )?;
    let gross_margin = checked(
        percent_of(revenue, input.margin_rate_pct).and_then(|m| m.checked_mul(margin_mult)),
        "scenario gross margin",
    )?;
    let fixed_costs = checked(
        adjust(input.base_fixed_costs, cost_mult, input.fixed_cost_change_pct),
        "scenario fixed costs",
    )?;
    let result = checked(gross_margin.checked_sub(fixed_costs), "scenario result")?;
    let net_margin_pct = if revenue > Decimal::ZERO {
        Some(checked(
            result.checked_div(revenue).and_then(|v| v.checked_mul(dec!(100))),
            "scenario net margin",
        )?)
    } else {
        None
    };
    Ok(ScenarioResult {
        scenario,
        revenue,
        gross_margin,
        fixed_costs,
        result,
        net_margin_pct,
    })
}

fn validate(input: &WhatIfInput) -> FinGuideResult<()> {
    if input.base_revenue < Decimal::ZERO {
        return Err(FinGuideError::InvalidInput {
            field: "base_revenue".to_string(),
            reason: "Base revenue cannot be negative".to_string(),
        });
    }
    if input.margin_rate_pct < Decimal::ZERO || input.margin_rate_pct > dec!(100) {
        return Err(FinGuideError::InvalidInput {
            field: "margin_rate_pct".to_string(),
            reason: "Margin rate must be between 0 and 100".to_string(),
        });
    }
    if input.base_fixed_costs < Decimal::ZERO {
        return Err(FinGuideError::InvalidInput {
            field: "base_fixed_costs".to_string(),
            reason: "Fixed costs cannot be negative".to_string(),
        });
    }
    if input.revenue_change_pct < dec!(-100) {
        return Err(FinGuideError::InvalidInput {
            field: "revenue_change_pct".to_string(),
            reason: "Revenue cannot fall by more than 100%".to_string(),
        });
    }
    Ok(())
}
