use super::dimension::{Dimension, DIMENSION_COUNT};
use serde::Serialize;
use std::collections::BTreeMap;

pub const WEIGHT_TOTAL: u32 = 100;

/// Percentage weight per dimension for the weighted-percentage index.
///
/// A table can only be built through [`WeightTable::validated`], so holding one
/// means its weights sum to exactly 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeightTable([u8; DIMENSION_COUNT]);

impl WeightTable {
    pub const fn standard() -> Self {
        Self([15, 15, 15, 15, 10, 10, 10, 10])
    }

    pub fn validated(weights: [u8; DIMENSION_COUNT]) -> Result<Self, WeightTableError> {
        let total: u32 = weights.iter().map(|weight| u32::from(*weight)).sum();
        if total != WEIGHT_TOTAL {
            return Err(WeightTableError::InvalidTotal { total });
        }
        Ok(Self(weights))
    }

    pub fn from_map(weights: &BTreeMap<Dimension, u8>) -> Result<Self, WeightTableError> {
        let mut table = [0; DIMENSION_COUNT];
        for dimension in Dimension::ordered() {
            table[dimension.index()] = *weights
                .get(&dimension)
                .ok_or(WeightTableError::MissingDimension(dimension))?;
        }
        Self::validated(table)
    }

    pub fn weight(&self, dimension: Dimension) -> u8 {
        self.0[dimension.index()]
    }

    pub fn total(&self) -> u32 {
        self.0.iter().map(|weight| u32::from(*weight)).sum()
    }
}

impl Default for WeightTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WeightTableError {
    #[error("dimension weights must total 100, found {total}")]
    InvalidTotal { total: u32 },
    #[error("no weight configured for dimension {0}")]
    MissingDimension(Dimension),
}
