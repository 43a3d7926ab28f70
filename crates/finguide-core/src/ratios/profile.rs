use serde::{Deserialize, Serialize};

use super::RatioKind;
use crate::{FinGuideError, FinGuideResult};

/// How the ratio engine derives net result from the income statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetResultPolicy {
    /// Revenue minus every line except revenue and financial income.
    /// Financial income is neither added nor charged, and inventory
    /// variation counts as a charge. This is the dashboard's historical
    /// figure and the default.
    #[default]
    ChargesExcludingFinancialIncome,
    /// Net result at the bottom of the intermediate-balance cascade.
    IntermediateBalances,
}

/// Which ratio families an analysis includes, and how net result is derived.
///
/// Replaces the per-application formula variants with one configurable
/// engine. Missing fields in a profile file take the comprehensive default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisProfile {
    pub include_debt_ratio: bool,
    pub include_roe: bool,
    pub include_net_margin: bool,
    pub include_asset_turnover: bool,
    pub include_inventory_days: bool,
    /// Covers both BFR and the net cash position derived from it.
    pub include_working_capital_need: bool,
    pub net_result: NetResultPolicy,
}

impl Default for AnalysisProfile {
    fn default() -> Self {
        Self::comprehensive()
    }
}

impl AnalysisProfile {
    /// Every ratio.
    pub fn comprehensive() -> Self {
        Self {
            include_debt_ratio: true,
            include_roe: true,
            include_net_margin: true,
            include_asset_turnover: true,
            include_inventory_days: true,
            include_working_capital_need: true,
            net_result: NetResultPolicy::default(),
        }
    }

    /// Working capital, current ratio and ROA only.
    pub fn essentials() -> Self {
        Self {
            include_debt_ratio: false,
            include_roe: false,
            include_net_margin: false,
            include_asset_turnover: false,
            include_inventory_days: false,
            include_working_capital_need: false,
            net_result: NetResultPolicy::default(),
        }
    }

    pub fn from_preset(name: &str) -> FinGuideResult<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "comprehensive" | "full" => Ok(Self::comprehensive()),
            "essentials" | "basic" => Ok(Self::essentials()),
            other => Err(FinGuideError::UnknownProfile(other.to_string())),
        }
    }

    pub fn with_net_result(mut self, policy: NetResultPolicy) -> Self {
        self.net_result = policy;
        self
    }

    pub fn includes(&self, kind: RatioKind) -> bool {
        match kind {
            RatioKind::WorkingCapital | RatioKind::CurrentRatio | RatioKind::RoaPct => true,
            RatioKind::DebtRatioPct => self.include_debt_ratio,
            RatioKind::RoePct => self.include_roe,
            RatioKind::NetMarginPct => self.include_net_margin,
            RatioKind::AssetTurnover => self.include_asset_turnover,
            RatioKind::InventoryDays => self.include_inventory_days,
            RatioKind::WorkingCapitalNeed | RatioKind::NetCashPosition => {
                self.include_working_capital_need
            }
        }
    }
}
