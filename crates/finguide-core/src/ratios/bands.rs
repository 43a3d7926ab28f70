use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use super::{messages, RatioKind, RatioSet, RatioValue};

/// Three-band classification shared by every ratio family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    Good,
    Warning,
    Critical,
}

impl Band {
    pub fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Warning => "Warning",
            Self::Critical => "Critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

/// Thresholds for one ratio. Bounds are strict: for higher-is-better,
/// `value > good` is good, `value > warning` is warning, anything else is
/// critical; lower-is-better mirrors this with `<`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BandRule {
    pub kind: RatioKind,
    pub direction: Direction,
    pub good: Decimal,
    pub warning: Decimal,
    /// Interpretation keys for good, warning, critical.
    pub keys: [&'static str; 3],
}

pub const BAND_RULES: [BandRule; 6] = [
    BandRule {
        kind: RatioKind::CurrentRatio,
        direction: Direction::HigherIsBetter,
        good: dec!(1.5),
        warning: dec!(1.0),
        keys: ["liquidity.excellent", "liquidity.watch", "liquidity.critical"],
    },
    BandRule {
        kind: RatioKind::DebtRatioPct,
        direction: Direction::LowerIsBetter,
        good: dec!(50),
        warning: dec!(70),
        keys: ["solvency.healthy", "solvency.moderate", "solvency.high"],
    },
    BandRule {
        kind: RatioKind::RoaPct,
        direction: Direction::HigherIsBetter,
        good: dec!(10),
        warning: dec!(5),
        keys: [
            "profitability.excellent",
            "profitability.satisfactory",
            "profitability.weak",
        ],
    },
    BandRule {
        kind: RatioKind::RoePct,
        direction: Direction::HigherIsBetter,
        good: dec!(15),
        warning: dec!(10),
        keys: ["roe.very_good", "roe.satisfactory", "roe.weak"],
    },
    BandRule {
        kind: RatioKind::NetMarginPct,
        direction: Direction::HigherIsBetter,
        good: dec!(15),
        warning: dec!(8),
        keys: [
            "net_margin.excellent",
            "net_margin.satisfactory",
            "net_margin.to_optimize",
        ],
    },
    BandRule {
        kind: RatioKind::AssetTurnover,
        direction: Direction::HigherIsBetter,
        good: dec!(1),
        warning: dec!(0.5),
        keys: [
            "asset_turnover.excellent",
            "asset_turnover.correct",
            "asset_turnover.underused",
        ],
    },
];

impl BandRule {
    pub fn classify(&self, value: RatioValue) -> Band {
        match self.direction {
            Direction::HigherIsBetter => {
                if value.is_above(self.good) {
                    Band::Good
                } else if value.is_above(self.warning) {
                    Band::Warning
                } else {
                    Band::Critical
                }
            }
            Direction::LowerIsBetter => {
                if value.is_below(self.good) {
                    Band::Good
                } else if value.is_below(self.warning) {
                    Band::Warning
                } else {
                    Band::Critical
                }
            }
        }
    }

    pub fn key(&self, band: Band) -> &'static str {
        match band {
            Band::Good => self.keys[0],
            Band::Warning => self.keys[1],
            Band::Critical => self.keys[2],
        }
    }
}

/// The band a ratio value falls in, with its interpretation key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Interpretation {
    pub kind: RatioKind,
    pub value: RatioValue,
    pub band: Band,
    pub key: &'static str,
}

impl Interpretation {
    /// Display text for this interpretation.
    pub fn message(&self) -> &'static str {
        messages::message(self.key).unwrap_or(messages::FALLBACK)
    }
}

pub fn rule_for(kind: RatioKind) -> Option<&'static BandRule> {
    BAND_RULES.iter().find(|rule| rule.kind == kind)
}

pub fn classify(kind: RatioKind, value: RatioValue) -> Option<Band> {
    rule_for(kind).map(|rule| rule.classify(value))
}

/// Interpretation of a single ratio; `None` for ratios without bands.
pub fn interpret(kind: RatioKind, value: RatioValue) -> Option<Interpretation> {
    rule_for(kind).map(|rule| {
        let band = rule.classify(value);
        Interpretation {
            kind,
            value,
            band,
            key: rule.key(band),
        }
    })
}

/// Interpretations for every banded ratio present in `ratios`, in ratio order.
pub fn interpret_all(ratios: &RatioSet) -> Vec<Interpretation> {
    ratios
        .iter()
        .filter_map(|(kind, value)| interpret(kind, value))
        .collect()
}
