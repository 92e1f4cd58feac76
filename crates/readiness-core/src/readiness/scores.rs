use super::dimension::{Dimension, DIMENSION_COUNT, SUB_COMPONENTS_PER_DIMENSION};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 7;
/// Midpoint placeholder shown for sub-components a coach has not touched yet.
pub const UNASSESSED_SCORE: u8 = 4;
/// Stands in for a dimension absent from legacy weighted input. It adds nothing to
/// the index and is not a low score for the category floor.
pub const MISSING_SCORE: u8 = 0;

/// A coach-assigned score, guaranteed to sit in `MIN_SCORE..=MAX_SCORE`.
///
/// The aggregator and classifier work on raw `u8` values and never check
/// range; this type is what the intake boundary uses to reject bad input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Score(u8);

impl Score {
    pub fn new(value: u8) -> Result<Self, ScoreError> {
        if (MIN_SCORE..=MAX_SCORE).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ScoreError { value })
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Score {
    type Error = ScoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> Self {
        score.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("score {value} is outside the 1-7 range")]
pub struct ScoreError {
    pub value: u8,
}

/// Raised when raw coach input cannot be turned into a complete assessment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssessmentError {
    #[error("assessment incomplete, missing scores for: {}", .missing.join(", "))]
    Incomplete { missing: Vec<String> },
    #[error("{field}: {source}")]
    OutOfRange {
        field: String,
        #[source]
        source: ScoreError,
    },
    #[error("unknown sub-component '{key}' for dimension {dimension}")]
    UnknownSubComponent { dimension: Dimension, key: String },
}

/// One direct score per dimension (weighted-percentage model).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<Dimension, u8>",
    into = "BTreeMap<Dimension, u8>"
)]
pub struct DimensionScores([u8; DIMENSION_COUNT]);

impl DimensionScores {
    pub const fn uniform(score: u8) -> Self {
        Self([score; DIMENSION_COUNT])
    }

    pub fn from_fn(mut score_for: impl FnMut(Dimension) -> u8) -> Self {
        let mut scores = [0; DIMENSION_COUNT];
        for dimension in Dimension::ordered() {
            scores[dimension.index()] = score_for(dimension);
        }
        Self(scores)
    }

    /// Builds scores from loosely keyed input, filling absent dimensions with [`MISSING_SCORE`].
    ///
    /// Matches how legacy weighted sessions were indexed, so an incomplete
    /// assessment understates readiness instead of failing. New intake goes
    /// through [`DimensionScores::from_complete`].
    pub fn from_partial(scores: &BTreeMap<Dimension, u8>) -> Self {
        let missing = missing_dimensions(scores);
        if !missing.is_empty() {
            warn!(
                missing = %missing.join(","),
                "zero-filling dimensions absent from legacy score input"
            );
        }
        Self::from_fn(|dimension| scores.get(&dimension).copied().unwrap_or(MISSING_SCORE))
    }

    pub fn from_complete(scores: &BTreeMap<Dimension, u8>) -> Result<Self, AssessmentError> {
        let missing = missing_dimensions(scores);
        if !missing.is_empty() {
            return Err(AssessmentError::Incomplete { missing });
        }
        Ok(Self::from_partial(scores))
    }

    pub fn get(&self, dimension: Dimension) -> u8 {
        self.0[dimension.index()]
    }

    pub fn set(&mut self, dimension: Dimension, score: u8) {
        self.0[dimension.index()] = score;
    }

    pub fn is_missing(&self, dimension: Dimension) -> bool {
        self.get(dimension) == MISSING_SCORE
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dimension, u8)> + '_ {
        Dimension::ordered()
            .into_iter()
            .map(move |dimension| (dimension, self.get(dimension)))
    }

    pub fn validate(&self) -> Result<(), AssessmentError> {
        for (dimension, value) in self.iter() {
            Score::new(value).map_err(|source| AssessmentError::OutOfRange {
                field: dimension.key().to_string(),
                source,
            })?;
        }
        Ok(())
    }
}

impl From<BTreeMap<Dimension, u8>> for DimensionScores {
    fn from(scores: BTreeMap<Dimension, u8>) -> Self {
        Self::from_partial(&scores)
    }
}

impl From<DimensionScores> for BTreeMap<Dimension, u8> {
    fn from(scores: DimensionScores) -> Self {
        scores.iter().collect()
    }
}

fn missing_dimensions(scores: &BTreeMap<Dimension, u8>) -> Vec<String> {
    Dimension::ordered()
        .into_iter()
        .filter(|dimension| !scores.contains_key(dimension))
        .map(|dimension| dimension.key().to_string())
        .collect()
}

/// Raw sub-component input keyed by dimension, then by sub-component key.
pub type SubComponentInput = BTreeMap<Dimension, BTreeMap<String, u8>>;

/// Three scores per dimension (sub-component model).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SubComponentInput", into = "SubComponentInput")]
pub struct SubComponentScores([[u8; SUB_COMPONENTS_PER_DIMENSION]; DIMENSION_COUNT]);

impl Default for SubComponentScores {
    fn default() -> Self {
        Self::uniform(UNASSESSED_SCORE)
    }
}

impl SubComponentScores {
    pub const fn uniform(score: u8) -> Self {
        Self([[score; SUB_COMPONENTS_PER_DIMENSION]; DIMENSION_COUNT])
    }

    pub fn from_complete(input: &SubComponentInput) -> Result<Self, AssessmentError> {
        let mut scores = Self::default();
        let mut missing = Vec::new();

        for (dimension, provided) in input {
            if let Some(key) = provided
                .keys()
                .find(|key| dimension.sub_component_index(key).is_none())
            {
                return Err(AssessmentError::UnknownSubComponent {
                    dimension: *dimension,
                    key: key.clone(),
                });
            }
        }

        for dimension in Dimension::ordered() {
            let provided = input.get(&dimension);
            for (slot, definition) in dimension.sub_components().iter().enumerate() {
                match provided.and_then(|values| values.get(definition.key)) {
                    Some(value) => scores.0[dimension.index()][slot] = *value,
                    None => missing.push(format!("{}.{}", dimension.key(), definition.key)),
                }
            }
        }

        if missing.is_empty() {
            Ok(scores)
        } else {
            Err(AssessmentError::Incomplete { missing })
        }
    }

    pub fn dimension(&self, dimension: Dimension) -> [u8; SUB_COMPONENTS_PER_DIMENSION] {
        self.0[dimension.index()]
    }

    pub fn set_dimension(
        &mut self,
        dimension: Dimension,
        scores: [u8; SUB_COMPONENTS_PER_DIMENSION],
    ) {
        self.0[dimension.index()] = scores;
    }

    /// Every sub-component score, in dimension then sub-component order.
    pub fn values(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.iter().flat_map(|scores| scores.iter().copied())
    }

    pub fn validate(&self) -> Result<(), AssessmentError> {
        for dimension in Dimension::ordered() {
            let scores = self.dimension(dimension);
            for (definition, value) in dimension.sub_components().iter().zip(scores) {
                Score::new(value).map_err(|source| AssessmentError::OutOfRange {
                    field: format!("{}.{}", dimension.key(), definition.key),
                    source,
                })?;
            }
        }
        Ok(())
    }
}

impl TryFrom<SubComponentInput> for SubComponentScores {
    type Error = AssessmentError;

    fn try_from(input: SubComponentInput) -> Result<Self, Self::Error> {
        Self::from_complete(&input)
    }
}

impl From<SubComponentScores> for SubComponentInput {
    fn from(scores: SubComponentScores) -> Self {
        Dimension::ordered()
            .into_iter()
            .map(|dimension| {
                let values = dimension
                    .sub_components()
                    .iter()
                    .zip(scores.dimension(dimension))
                    .map(|(definition, value)| (definition.key.to_string(), value))
                    .collect();
                (dimension, values)
            })
            .collect()
    }
}
