use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FinGuideError;
use crate::ratios::{RatioKind, RatioSet, RatioValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sector {
    Commerce,
    Industry,
    Services,
    Technology,
    Construction,
}

impl Sector {
    pub const ALL: [Sector; 5] = [
        Self::Commerce,
        Self::Industry,
        Self::Services,
        Self::Technology,
        Self::Construction,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Commerce => "Commerce",
            Self::Industry => "Industry",
            Self::Services => "Services",
            Self::Technology => "Technology",
            Self::Construction => "Construction",
        }
    }

    pub fn benchmark(self) -> SectorBenchmark {
        let (current_ratio, debt_ratio_pct, roa_pct, asset_turnover, net_margin_pct) = match self {
            Self::Commerce => (dec!(1.8), dec!(55), dec!(8.2), dec!(1.2), dec!(3.5)),
            Self::Industry => (dec!(1.5), dec!(60), dec!(9.5), dec!(0.8), dec!(6.2)),
            Self::Services => (dec!(1.9), dec!(45), dec!(11.3), dec!(1.5), dec!(12.5)),
            Self::Technology => (dec!(2.3), dec!(40), dec!(15.2), dec!(1.8), dec!(18.7)),
            Self::Construction => (dec!(1.4), dec!(65), dec!(7.8), dec!(0.9), dec!(4.1)),
        };
        SectorBenchmark {
            sector: self,
            current_ratio,
            debt_ratio_pct,
            roa_pct,
            asset_turnover,
            net_margin_pct,
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Sector {
    type Err = FinGuideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|sector| sector.label().eq_ignore_ascii_case(name))
            .ok_or_else(|| FinGuideError::UnknownSector(name.to_string()))
    }
}

/// Reference ratios for a sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorBenchmark {
    pub sector: Sector,
    pub current_ratio: Decimal,
    pub debt_ratio_pct: Decimal,
    pub roa_pct: Decimal,
    pub asset_turnover: Decimal,
    pub net_margin_pct: Decimal,
}

impl SectorBenchmark {
    /// Benchmarked ratios, in ratio order.
    pub fn values(&self) -> [(RatioKind, Decimal); 5] {
        [
            (RatioKind::CurrentRatio, self.current_ratio),
            (RatioKind::DebtRatioPct, self.debt_ratio_pct),
            (RatioKind::RoaPct, self.roa_pct),
            (RatioKind::NetMarginPct, self.net_margin_pct),
            (RatioKind::AssetTurnover, self.asset_turnover),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkRow {
    pub ratio: RatioKind,
    pub company: Option<RatioValue>,
    pub sector: Decimal,
    /// Company minus sector; `None` when the company value is absent, infinite
    /// or too far out of range to subtract.
    pub difference: Option<Decimal>,
}

pub fn compare_to_sector(ratios: &RatioSet, sector: Sector) -> Vec<BenchmarkRow> {
    sector
        .benchmark()
        .values()
        .into_iter()
        .map(|(kind, reference)| {
            let company = ratios.get(kind);
            BenchmarkRow {
                ratio: kind,
                company,
                sector: reference,
                difference: company
                    .and_then(RatioValue::finite)
                    .and_then(|v| v.checked_sub(reference)),
            }
        })
        .collect()
}
