//! Readiness scoring: per-dimension aggregation, the readiness index, and A/B/C banding.
//!
//! Two scoring generations exist. Sub-component sessions (24 scores, raw-sum
//! index in 24..=168) are the canonical model; weighted-percentage sessions
//! (8 direct scores, index in 0..=100) are kept so stored legacy sessions can be
//! re-derived. Every input carries its [`ScoringModel`] so the formulas are
//! never mixed.

mod aggregator;
mod classifier;
mod dimension;
mod scores;
mod weights;

pub use aggregator::{
    compute_dimension_average, dimension_averages, raw_sum_readiness_index,
    weighted_readiness_index,
};
pub use classifier::{
    classify_raw_sum, classify_weighted, ReadinessCategory, CRITICAL_DIMENSION_SCORE,
    RAW_SUM_CATEGORY_A_MIN, RAW_SUM_CATEGORY_B_MIN, WEIGHTED_CATEGORY_A_MIN,
    WEIGHTED_CATEGORY_C_BELOW,
};
pub use dimension::{
    Dimension, SubComponentDefinition, DIMENSION_COUNT, SUB_COMPONENTS_PER_DIMENSION,
};
pub use scores::{
    AssessmentError, DimensionScores, Score, ScoreError, SubComponentInput, SubComponentScores,
    MAX_SCORE, MIN_SCORE, MISSING_SCORE, UNASSESSED_SCORE,
};
pub use weights::{WeightTable, WeightTableError, WEIGHT_TOTAL};

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Which generation of the scoring rules produced (or should produce) an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringModel {
    WeightedPercentage,
    SubComponentSum,
}

impl ScoringModel {
    pub const CANONICAL: Self = Self::SubComponentSum;

    pub const fn ordered() -> [Self; 2] {
        [Self::SubComponentSum, Self::WeightedPercentage]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::WeightedPercentage => "weighted_percentage",
            Self::SubComponentSum => "sub_component_sum",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::WeightedPercentage => "Weighted percentage (legacy)",
            Self::SubComponentSum => "Sub-component sum",
        }
    }

    /// Inclusive index bounds for valid input.
    pub const fn index_range(self) -> (u32, u32) {
        match self {
            Self::WeightedPercentage => (0, 100),
            Self::SubComponentSum => (24, 168),
        }
    }
}

impl fmt::Display for ScoringModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Raw coach scores tagged with the model they belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "model", content = "scores", rename_all = "snake_case")]
pub enum AssessmentScores {
    WeightedPercentage(DimensionScores),
    SubComponentSum(SubComponentScores),
}

impl AssessmentScores {
    pub fn model(&self) -> ScoringModel {
        match self {
            Self::WeightedPercentage(_) => ScoringModel::WeightedPercentage,
            Self::SubComponentSum(_) => ScoringModel::SubComponentSum,
        }
    }

    /// Direct scores for the weighted model, rounded sub-component means otherwise.
    pub fn dimension_averages(&self) -> DimensionScores {
        match self {
            Self::WeightedPercentage(scores) => *scores,
            Self::SubComponentSum(scores) => dimension_averages(scores),
        }
    }

    pub fn validate(&self) -> Result<(), AssessmentError> {
        match self {
            Self::WeightedPercentage(scores) => scores.validate(),
            Self::SubComponentSum(scores) => scores.validate(),
        }
    }
}

/// Derived readiness values stored alongside the raw scores of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessAssessment {
    pub model: ScoringModel,
    pub readiness_index: u32,
    pub readiness_category: ReadinessCategory,
    pub dimension_averages: DimensionScores,
}

impl ReadinessAssessment {
    /// Index expressed as a share of the model's maximum, rounded.
    pub fn percentage(&self) -> u8 {
        let (_, max) = self.model.index_range();
        let pct = (f64::from(self.readiness_index) / f64::from(max)) * 100.0;
        pct.round().clamp(0.0, 100.0) as u8
    }

    pub fn summary(&self) -> String {
        let (_, max) = self.model.index_range();
        format!(
            "category {} ({}), index {}/{}",
            self.readiness_category,
            self.readiness_category.label(),
            self.readiness_index,
            max
        )
    }
}

/// Stateless engine applying the scoring rules for either model.
#[derive(Debug, Clone, Default)]
pub struct ReadinessEngine {
    weights: WeightTable,
}

impl ReadinessEngine {
    pub fn new(weights: WeightTable) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    pub fn assess(&self, scores: &AssessmentScores) -> ReadinessAssessment {
        let dimension_averages = scores.dimension_averages();
        let (readiness_index, readiness_category) = match scores {
            AssessmentScores::WeightedPercentage(direct) => {
                let index = weighted_readiness_index(direct, &self.weights);
                (index, classify_weighted(index, direct))
            }
            AssessmentScores::SubComponentSum(sub_components) => {
                let index = raw_sum_readiness_index(sub_components);
                (index, classify_raw_sum(index))
            }
        };

        debug!(
            model = %scores.model(),
            readiness_index,
            category = %readiness_category,
            "assessed readiness"
        );

        ReadinessAssessment {
            model: scores.model(),
            readiness_index,
            readiness_category,
            dimension_averages,
        }
    }
}
