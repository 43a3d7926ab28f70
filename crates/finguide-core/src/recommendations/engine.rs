use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ratios::{RatioKind, RatioSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// Advice produced by one triggered rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub title: String,
    pub actions: Vec<String>,
    pub expected_impact: String,
}

impl Recommendation {
    /// Append a caller-supplied action after the canned ones.
    pub fn add_action(&mut self, action: impl Into<String>) {
        self.actions.push(action.into());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    Below(Decimal),
    Above(Decimal),
}

struct RecommendationRule {
    kind: RatioKind,
    trigger: Trigger,
    priority: Priority,
    title: &'static str,
    actions: [&'static str; 3],
    impact: &'static str,
}

/// Evaluated in this order; rules are independent of one another.
const RULES: [RecommendationRule; 4] = [
    RecommendationRule {
        kind: RatioKind::CurrentRatio,
        trigger: Trigger::Below(dec!(1.0)),
        priority: Priority::High,
        title: "Improve liquidity",
        actions: [
            "Renegotiate payment terms with suppliers",
            "Speed up collection of trade receivables",
            "Reduce unnecessary inventories",
        ],
        impact: "Lower risk of payment default",
    },
    RecommendationRule {
        kind: RatioKind::AssetTurnover,
        trigger: Trigger::Below(dec!(0.5)),
        priority: Priority::Medium,
        title: "Optimize asset rotation",
        actions: [
            "Sell under-used fixed assets",
            "Subcontract rather than invest",
            "Improve operational efficiency",
        ],
        impact: "Higher return on invested assets",
    },
    RecommendationRule {
        kind: RatioKind::DebtRatioPct,
        trigger: Trigger::Above(dec!(70)),
        priority: Priority::High,
        title: "Reduce indebtedness",
        actions: [
            "Increase equity through a capital increase",
            "Renegotiate interest rates",
            "Repay early where possible",
        ],
        impact: "Better solvency and lower financial charges",
    },
    RecommendationRule {
        kind: RatioKind::RoaPct,
        trigger: Trigger::Below(dec!(5)),
        priority: Priority::Medium,
        title: "Improve profitability",
        actions: [
            "Raise prices or cut costs",
            "Develop new products or services",
            "Optimise the product mix",
        ],
        impact: "Higher net result and self-financing capacity",
    },
];

impl RecommendationRule {
    /// A rule whose ratio is absent never fires.
    fn triggered(&self, ratios: &RatioSet) -> bool {
        match (ratios.get(self.kind), self.trigger) {
            (Some(value), Trigger::Below(threshold)) => value.is_below(threshold),
            (Some(value), Trigger::Above(threshold)) => value.is_above(threshold),
            (None, _) => false,
        }
    }

    fn build(&self) -> Recommendation {
        Recommendation {
            priority: self.priority,
            title: self.title.to_string(),
            actions: self.actions.iter().map(|a| a.to_string()).collect(),
            expected_impact: self.impact.to_string(),
        }
    }
}

/// Rule-based advice for the given ratios. Empty when nothing fires.
pub fn generate_recommendations(ratios: &RatioSet) -> Vec<Recommendation> {
    let recommendations: Vec<Recommendation> = RULES
        .iter()
        .filter(|rule| rule.triggered(ratios))
        .map(RecommendationRule::build)
        .collect();
    debug!(count = recommendations.len(), "recommendations generated");
    recommendations
}
