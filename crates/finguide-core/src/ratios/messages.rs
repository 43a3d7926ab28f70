//! Display strings for interpretation keys, kept apart from the thresholds
//! so a front-end can swap the language without touching the bands.

/// Shown when a key has no entry.
pub const FALLBACK: &str = "To be analysed in the context of the sector.";

const MESSAGES: &[(&str, &str)] = &[
    (
        "liquidity.excellent",
        "Excellent ability to meet short-term debts.",
    ),
    (
        "liquidity.watch",
        "Acceptable liquidity that needs monitoring; consider optimising the working-capital need.",
    ),
    (
        "liquidity.critical",
        "High risk of default: reduce the working-capital need and renegotiate payment terms urgently.",
    ),
    (
        "solvency.healthy",
        "Balanced financial structure with little dependence on debt.",
    ),
    (
        "solvency.moderate",
        "Indebtedness to monitor; avoid taking on new short-term debt.",
    ),
    (
        "solvency.high",
        "Solvency risk: reduce debt and strengthen equity first.",
    ),
    (
        "profitability.excellent",
        "Assets generate above-average returns.",
    ),
    (
        "profitability.satisfactory",
        "Correct profitability; look for better use of assets.",
    ),
    (
        "profitability.weak",
        "Insufficient profitability: improve margin or asset rotation.",
    ),
    ("roe.very_good", "Very good return for shareholders."),
    ("roe.satisfactory", "Satisfactory return on equity."),
    ("roe.weak", "Return on equity needs improvement."),
    ("net_margin.excellent", "Excellent margin."),
    ("net_margin.satisfactory", "Satisfactory margin."),
    ("net_margin.to_optimize", "Margin to optimise."),
    (
        "asset_turnover.excellent",
        "Excellent operational efficiency.",
    ),
    ("asset_turnover.correct", "Correct efficiency."),
    (
        "asset_turnover.underused",
        "Efficiency to improve: assets are under-used.",
    ),
];

pub fn message(key: &str) -> Option<&'static str> {
    MESSAGES
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, text)| *text)
}
