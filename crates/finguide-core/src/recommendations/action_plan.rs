use serde::Serialize;

/// One row of the standing action plan attached to every report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActionPlanEntry {
    pub aspect: &'static str,
    pub objective: &'static str,
    pub actions: &'static str,
}

const ACTION_PLAN: [ActionPlanEntry; 5] = [
    ActionPlanEntry {
        aspect: "Liquidity",
        objective: "Keep the current ratio above 1.5",
        actions: "Renegotiate supplier terms, speed up collections",
    },
    ActionPlanEntry {
        aspect: "Solvency",
        objective: "Keep the debt ratio below 50%",
        actions: "Increase equity, limit new borrowing",
    },
    ActionPlanEntry {
        aspect: "Profitability",
        objective: "Target ROA above 8% and ROE above 12%",
        actions: "Optimise margin, improve asset rotation",
    },
    ActionPlanEntry {
        aspect: "Efficiency",
        objective: "Asset turnover above 0.8",
        actions: "Reduce unproductive fixed assets, optimise inventories",
    },
    ActionPlanEntry {
        aspect: "Cash",
        objective: "Positive net cash position",
        actions: "Manage the working-capital need closely, anticipate seasonal needs",
    },
];

pub fn action_plan() -> &'static [ActionPlanEntry] {
    &ACTION_PLAN
}
