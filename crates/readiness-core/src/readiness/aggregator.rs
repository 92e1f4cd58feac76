use super::dimension::{Dimension, SUB_COMPONENTS_PER_DIMENSION};
use super::scores::{DimensionScores, SubComponentScores, MAX_SCORE};
use super::weights::WeightTable;

/// Mean of a dimension's three sub-component scores, rounded half up.
///
/// Range is not checked; callers validate scores at intake.
pub fn compute_dimension_average(scores: [u8; SUB_COMPONENTS_PER_DIMENSION]) -> u8 {
    let sum: u32 = scores.iter().map(|score| u32::from(*score)).sum();
    let count = SUB_COMPONENTS_PER_DIMENSION as u32;
    // floor(sum / count + 1/2) in integer arithmetic
    ((2 * sum + count) / (2 * count)) as u8
}

/// Per-dimension averages for the sub-component model.
pub fn dimension_averages(scores: &SubComponentScores) -> DimensionScores {
    DimensionScores::from_fn(|dimension| compute_dimension_average(scores.dimension(dimension)))
}

/// Weighted-percentage index: sum of `score / 7 * weight`, rounded to the nearest integer.
pub fn weighted_readiness_index(scores: &DimensionScores, weights: &WeightTable) -> u32 {
    let total: f64 = Dimension::ordered()
        .into_iter()
        .map(|dimension| {
            let score = f64::from(scores.get(dimension));
            let weight = f64::from(weights.weight(dimension));
            (score / f64::from(MAX_SCORE)) * weight
        })
        .sum();

    total.round().max(0.0) as u32
}

/// Raw-sum index: the unweighted total of all 24 sub-component scores.
pub fn raw_sum_readiness_index(scores: &SubComponentScores) -> u32 {
    scores.values().map(u32::from).sum()
}
