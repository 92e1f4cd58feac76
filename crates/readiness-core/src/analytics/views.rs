use std::collections::BTreeMap;

use serde::Serialize;

use crate::barriers::BarrierSeverity;
use crate::readiness::{Dimension, ReadinessCategory, ScoringModel};
use crate::sessions::SessionId;

/// Dimension label used when a barrier is not tied to any dimension.
pub const CROSS_CUTTING_LABEL: &str = "Cross-Cutting";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryDistribution {
    pub a: usize,
    pub b: usize,
    pub c: usize,
}

impl CategoryDistribution {
    pub fn record(&mut self, category: ReadinessCategory) {
        match category {
            ReadinessCategory::A => self.a += 1,
            ReadinessCategory::B => self.b += 1,
            ReadinessCategory::C => self.c += 1,
        }
    }

    pub fn count(&self, category: ReadinessCategory) -> usize {
        match category {
            ReadinessCategory::A => self.a,
            ReadinessCategory::B => self.b,
            ReadinessCategory::C => self.c,
        }
    }

    pub fn total(&self) -> usize {
        self.a + self.b + self.c
    }
}

/// Aggregates for the sessions saved under one scoring model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelSummary {
    pub model: ScoringModel,
    pub model_label: &'static str,
    pub sessions: usize,
    pub average_readiness_index: u32,
    pub categories: CategoryDistribution,
    pub average_dimension_scores: BTreeMap<Dimension, u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarrierStatistic {
    pub code: String,
    pub label: String,
    pub category: String,
    pub dimension: Option<Dimension>,
    pub dimension_label: &'static str,
    pub severity: BarrierSeverity,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsSummary {
    pub total_sessions: usize,
    pub unique_participants: usize,
    pub models: Vec<ModelSummary>,
    pub total_barriers: usize,
    pub high_severity_barriers: usize,
    pub barrier_statistics: Vec<BarrierStatistic>,
}

impl AnalyticsSummary {
    pub fn model(&self, model: ScoringModel) -> Option<&ModelSummary> {
        self.models.iter().find(|summary| summary.model == model)
    }
}

/// A stored session whose derived values no longer match its raw scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexDrift {
    pub session_id: SessionId,
    pub model: ScoringModel,
    pub stored_index: u32,
    pub stored_category: ReadinessCategory,
    pub derived_index: u32,
    pub derived_category: ReadinessCategory,
}
