use super::scores::DimensionScores;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const WEIGHTED_CATEGORY_A_MIN: u32 = 80;
pub const WEIGHTED_CATEGORY_C_BELOW: u32 = 60;
/// Any dimension at or below this blocks category A in the weighted model.
pub const CRITICAL_DIMENSION_SCORE: u8 = 3;

pub const RAW_SUM_CATEGORY_A_MIN: u32 = 126;
pub const RAW_SUM_CATEGORY_B_MIN: u32 = 84;

/// Ordinal readiness band; A is closest to the labour market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ReadinessCategory {
    A,
    B,
    C,
}

impl ReadinessCategory {
    pub const fn ordered() -> [Self; 3] {
        [Self::A, Self::B, Self::C]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::A => "Work-ready",
            Self::B => "Close to work-ready",
            Self::C => "Needs significant support",
        }
    }

    pub const fn labour_market_distance(self) -> &'static str {
        match self {
            Self::A => "closest to labour market",
            Self::B => "moderate distance",
            Self::C => "furthest from labour market",
        }
    }
}

impl fmt::Display for ReadinessCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Weighted-percentage bands. The A check runs first and also requires every
/// scored dimension to sit above [`CRITICAL_DIMENSION_SCORE`]; failing it falls
/// through to the index-only B/C split. Dimensions missing from legacy input
/// are left out of the floor check.
pub fn classify_weighted(index: u32, scores: &DimensionScores) -> ReadinessCategory {
    let has_critical_dimension = scores
        .iter()
        .filter(|(dimension, _)| !scores.is_missing(*dimension))
        .any(|(_, score)| score <= CRITICAL_DIMENSION_SCORE);

    if index >= WEIGHTED_CATEGORY_A_MIN && !has_critical_dimension {
        ReadinessCategory::A
    } else if index < WEIGHTED_CATEGORY_C_BELOW {
        ReadinessCategory::C
    } else {
        ReadinessCategory::B
    }
}

/// Raw-sum bands at 75% and 50% of the 168 maximum, with no per-dimension override.
pub fn classify_raw_sum(index: u32) -> ReadinessCategory {
    if index >= RAW_SUM_CATEGORY_A_MIN {
        ReadinessCategory::A
    } else if index >= RAW_SUM_CATEGORY_B_MIN {
        ReadinessCategory::B
    } else {
        ReadinessCategory::C
    }
}
