use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use finguide_core::budget::{
    cash_budget, sales_budget, what_if, CashBudgetInput, SalesBudgetInput, WhatIfInput,
};

use crate::input;

/// Arguments for the sales budget
#[derive(Args)]
pub struct SalesBudgetArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,

    /// Twelve monthly forecasts, comma-separated, January first
    #[arg(long, value_delimiter = ',', num_args = 1..)]
    pub monthly: Vec<Decimal>,
}

/// Arguments for the cash budget
#[derive(Args)]
pub struct CashBudgetArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,

    /// Average revenue collected per month
    #[arg(long)]
    pub collected_revenue: Option<Decimal>,

    /// Other monthly inflows (grants, capital contributions)
    #[arg(long)]
    pub other_inflows: Option<Decimal>,

    /// Monthly purchases
    #[arg(long)]
    pub purchases: Option<Decimal>,

    /// Monthly personnel expenses
    #[arg(long)]
    pub personnel: Option<Decimal>,

    /// Other monthly charges
    #[arg(long)]
    pub other_charges: Option<Decimal>,

    /// Twelve seasonality coefficients, comma-separated
    #[arg(long, value_delimiter = ',')]
    pub seasonality: Option<Vec<Decimal>>,
}

/// Arguments for the what-if simulator
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct WhatIfArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,

    /// Annual base revenue
    #[arg(long)]
    pub revenue: Option<Decimal>,

    /// Margin on variable costs, in percent (e.g. 35)
    #[arg(long)]
    pub margin_rate: Option<Decimal>,

    /// Revenue change applied to every scenario, in percent
    #[arg(long)]
    pub revenue_change: Option<Decimal>,

    /// Fixed-cost change, in percent
    #[arg(long)]
    pub fixed_cost_change: Option<Decimal>,

    /// Annual fixed costs before adjustment
    #[arg(long)]
    pub fixed_costs: Option<Decimal>,
}

pub fn run_sales_budget(args: SalesBudgetArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sales_input: SalesBudgetInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if !args.monthly.is_empty() {
        SalesBudgetInput {
            monthly_sales: args.monthly,
        }
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--monthly <12 values>, --input <file.json> or stdin required".into());
    };
    let result = sales_budget(&sales_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_cash_budget(args: CashBudgetArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let cash_input: CashBudgetInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        CashBudgetInput {
            collected_revenue: args
                .collected_revenue
                .ok_or("--collected-revenue is required (or provide --input)")?,
            other_inflows: args.other_inflows.unwrap_or(Decimal::ZERO),
            purchases: args
                .purchases
                .ok_or("--purchases is required (or provide --input)")?,
            personnel_expenses: args
                .personnel
                .ok_or("--personnel is required (or provide --input)")?,
            other_charges: args.other_charges.unwrap_or(Decimal::ZERO),
            seasonality: args.seasonality,
        }
    };
    let result = cash_budget(&cash_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_what_if(args: WhatIfArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sim_input: WhatIfInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        WhatIfInput {
            base_revenue: args
                .revenue
                .ok_or("--revenue is required (or provide --input)")?,
            margin_rate_pct: args
                .margin_rate
                .ok_or("--margin-rate is required (or provide --input)")?,
            revenue_change_pct: args.revenue_change.unwrap_or(Decimal::ZERO),
            fixed_cost_change_pct: args.fixed_cost_change.unwrap_or(Decimal::ZERO),
            base_fixed_costs: args.fixed_costs.unwrap_or(dec!(150000)),
        }
    };
    let result = what_if(&sim_input)?;
    Ok(serde_json::to_value(result)?)
}
