use std::collections::{BTreeMap, HashSet};

use tracing::warn;

use super::views::{
    AnalyticsSummary, BarrierStatistic, CategoryDistribution, IndexDrift, ModelSummary,
    CROSS_CUTTING_LABEL,
};
use crate::barriers::{BarrierCatalog, BarrierSeverity};
use crate::readiness::{Dimension, ReadinessEngine, ScoringModel};
use crate::sessions::SessionRecord;

#[derive(Debug, Default)]
struct ModelTotals {
    sessions: u32,
    index_sum: u32,
    categories: CategoryDistribution,
    dimension_sums: BTreeMap<Dimension, u32>,
}

/// Round-half-up mean of non-negative integer totals.
fn rounded_mean(sum: u32, count: u32) -> u32 {
    if count == 0 {
        return 0;
    }
    (2 * sum + count) / (2 * count)
}

type BarrierKey = (String, BarrierSeverity, Option<Dimension>);

impl AnalyticsSummary {
    /// Aggregates stored values only; indices are never averaged across scoring models.
    pub fn from_sessions(sessions: &[SessionRecord], catalog: &BarrierCatalog) -> Self {
        let mut participants = HashSet::new();
        let mut totals: BTreeMap<ScoringModel, ModelTotals> = BTreeMap::new();
        let mut barrier_counts: BTreeMap<BarrierKey, usize> = BTreeMap::new();
        let mut labels: BTreeMap<String, (String, String)> = BTreeMap::new();
        let mut total_barriers = 0;
        let mut high_severity_barriers = 0;

        for session in sessions {
            participants.insert(session.participant_id.clone());

            let bucket = totals.entry(session.model()).or_default();
            bucket.sessions += 1;
            bucket.index_sum += session.readiness_index();
            bucket.categories.record(session.readiness_category());
            for (dimension, average) in session.assessment.dimension_averages.iter() {
                *bucket.dimension_sums.entry(dimension).or_default() += u32::from(average);
            }

            for barrier in session.barriers.records() {
                total_barriers += 1;
                if barrier.severity == BarrierSeverity::High {
                    high_severity_barriers += 1;
                }
                *barrier_counts
                    .entry((barrier.code.clone(), barrier.severity, barrier.dimension))
                    .or_default() += 1;
                labels
                    .entry(barrier.code.clone())
                    .or_insert_with(|| match catalog.find(&barrier.code) {
                        Some(entry) => (entry.label.clone(), entry.category.clone()),
                        None => (barrier.label.clone(), barrier.category.clone()),
                    });
            }
        }

        let models = ScoringModel::ordered()
            .into_iter()
            .filter_map(|model| {
                totals.remove(&model).map(|bucket| ModelSummary {
                    model,
                    model_label: model.label(),
                    sessions: bucket.sessions as usize,
                    average_readiness_index: rounded_mean(bucket.index_sum, bucket.sessions),
                    categories: bucket.categories,
                    average_dimension_scores: bucket
                        .dimension_sums
                        .into_iter()
                        .map(|(dimension, sum)| (dimension, rounded_mean(sum, bucket.sessions)))
                        .collect(),
                })
            })
            .collect();

        let mut barrier_statistics: Vec<BarrierStatistic> = barrier_counts
            .into_iter()
            .map(|((code, severity, dimension), count)| {
                let (label, category) = labels.get(&code).cloned().unwrap_or_default();
                BarrierStatistic {
                    code,
                    label,
                    category,
                    dimension,
                    dimension_label: dimension.map_or(CROSS_CUTTING_LABEL, Dimension::label),
                    severity,
                    count,
                }
            })
            .collect();
        barrier_statistics.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.code.cmp(&b.code)));

        Self {
            total_sessions: sessions.len(),
            unique_participants: participants.len(),
            models,
            total_barriers,
            high_severity_barriers,
            barrier_statistics,
        }
    }

    /// Re-runs `engine` over stored raw scores and reports sessions whose stored
    /// index or category disagrees with the current rules.
    pub fn rederive(sessions: &[SessionRecord], engine: &ReadinessEngine) -> Vec<IndexDrift> {
        sessions
            .iter()
            .filter_map(|session| {
                let derived = engine.assess(&session.scores);
                let drifted = derived.readiness_index != session.readiness_index()
                    || derived.readiness_category != session.readiness_category();
                if !drifted {
                    return None;
                }

                warn!(
                    session_id = %session.session_id.0,
                    stored_index = session.readiness_index(),
                    derived_index = derived.readiness_index,
                    "stored readiness disagrees with re-derived value"
                );
                Some(IndexDrift {
                    session_id: session.session_id.clone(),
                    model: session.model(),
                    stored_index: session.readiness_index(),
                    stored_category: session.readiness_category(),
                    derived_index: derived.readiness_index,
                    derived_category: derived.readiness_category,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounded_mean_rounds_half_up() {
        assert_eq!(rounded_mean(0, 0), 0);
        assert_eq!(rounded_mean(5, 2), 3);
        assert_eq!(rounded_mean(7, 3), 2);
        assert_eq!(rounded_mean(250, 2), 125);
    }
}
