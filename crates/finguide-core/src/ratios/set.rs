use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Serialized form of [`RatioValue::Infinite`].
pub const INFINITY_LABEL: &str = "inf";

/// Every ratio the engine can produce, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioKind {
    /// FR: current assets minus debt.
    WorkingCapital,
    CurrentRatio,
    DebtRatioPct,
    RoaPct,
    RoePct,
    NetMarginPct,
    AssetTurnover,
    InventoryDays,
    /// BFR: inventories + receivables - trade payables.
    WorkingCapitalNeed,
    NetCashPosition,
}

impl RatioKind {
    pub const ALL: [RatioKind; 10] = [
        Self::WorkingCapital,
        Self::CurrentRatio,
        Self::DebtRatioPct,
        Self::RoaPct,
        Self::RoePct,
        Self::NetMarginPct,
        Self::AssetTurnover,
        Self::InventoryDays,
        Self::WorkingCapitalNeed,
        Self::NetCashPosition,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::WorkingCapital => "working_capital",
            Self::CurrentRatio => "current_ratio",
            Self::DebtRatioPct => "debt_ratio_pct",
            Self::RoaPct => "roa_pct",
            Self::RoePct => "roe_pct",
            Self::NetMarginPct => "net_margin_pct",
            Self::AssetTurnover => "asset_turnover",
            Self::InventoryDays => "inventory_days",
            Self::WorkingCapitalNeed => "working_capital_need",
            Self::NetCashPosition => "net_cash_position",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::WorkingCapital => "Working capital (FR)",
            Self::CurrentRatio => "Current ratio",
            Self::DebtRatioPct => "Debt ratio (%)",
            Self::RoaPct => "ROA (%)",
            Self::RoePct => "ROE (%)",
            Self::NetMarginPct => "Net margin (%)",
            Self::AssetTurnover => "Asset turnover",
            Self::InventoryDays => "Inventory days",
            Self::WorkingCapitalNeed => "Working-capital need (BFR)",
            Self::NetCashPosition => "Net cash position",
        }
    }
}

/// A computed ratio: a finite decimal, or `+infinity` when the denominator
/// is zero and the numerator non-negative (no short-term debt exposure).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatioValue {
    Finite(Decimal),
    Infinite,
}

impl RatioValue {
    pub fn finite(self) -> Option<Decimal> {
        match self {
            Self::Finite(v) => Some(v),
            Self::Infinite => None,
        }
    }

    pub fn is_infinite(self) -> bool {
        matches!(self, Self::Infinite)
    }

    /// Strictly below `threshold`. Infinity is never below anything.
    pub fn is_below(self, threshold: Decimal) -> bool {
        match self {
            Self::Finite(v) => v < threshold,
            Self::Infinite => false,
        }
    }

    /// Strictly above `threshold`. Infinity is above everything.
    pub fn is_above(self, threshold: Decimal) -> bool {
        match self {
            Self::Finite(v) => v > threshold,
            Self::Infinite => true,
        }
    }

    /// Rounded for display or export; infinity is left as is.
    pub fn round_dp(self, dp: u32) -> Self {
        match self {
            Self::Finite(v) => Self::Finite(v.round_dp(dp).normalize()),
            Self::Infinite => Self::Infinite,
        }
    }
}

impl From<Decimal> for RatioValue {
    fn from(v: Decimal) -> Self {
        Self::Finite(v)
    }
}

impl fmt::Display for RatioValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(v) => write!(f, "{}", v.normalize()),
            Self::Infinite => f.write_str(INFINITY_LABEL),
        }
    }
}

impl Serialize for RatioValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Finite(v) => Serialize::serialize(v, serializer),
            Self::Infinite => serializer.serialize_str(INFINITY_LABEL),
        }
    }
}

impl<'de> Deserialize<'de> for RatioValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(Decimal),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(v) => Ok(Self::Finite(v)),
            Raw::Text(s) => {
                let s = s.trim();
                if s.eq_ignore_ascii_case(INFINITY_LABEL) || s.eq_ignore_ascii_case("infinity") {
                    Ok(Self::Infinite)
                } else {
                    Decimal::from_str(s)
                        .map(Self::Finite)
                        .map_err(serde::de::Error::custom)
                }
            }
        }
    }
}

/// Ratios keyed by kind, iterated in [`RatioKind`] order.
///
/// A missing key means "not computable"; it is never a stand-in for zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatioSet(BTreeMap<RatioKind, RatioValue>);

impl RatioSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: RatioKind, value: RatioValue) {
        self.0.insert(kind, value);
    }

    pub fn get(&self, kind: RatioKind) -> Option<RatioValue> {
        self.0.get(&kind).copied()
    }

    pub fn contains(&self, kind: RatioKind) -> bool {
        self.0.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RatioKind, RatioValue)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }
}

impl FromIterator<(RatioKind, RatioValue)> for RatioSet {
    fn from_iter<T: IntoIterator<Item = (RatioKind, RatioValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
