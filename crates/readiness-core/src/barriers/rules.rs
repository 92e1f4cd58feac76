use super::catalog::BarrierCatalog;
use crate::readiness::Dimension;
use serde::Serialize;
use std::collections::BTreeMap;

/// Ordered barrier codes to raise for each dimension, most relevant first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SuggestionRules {
    rules: BTreeMap<Dimension, Vec<String>>,
}

impl SuggestionRules {
    pub fn new(rules: BTreeMap<Dimension, Vec<String>>) -> Self {
        Self { rules }
    }

    pub fn standard() -> Self {
        let table: [(Dimension, &[&str]); 8] = [
            (
                Dimension::Motivation,
                &["low_motivation", "unrealistic_expectations"],
            ),
            (
                Dimension::Career,
                &["lack_career_direction", "limited_work_experience"],
            ),
            (
                Dimension::Search,
                &["no_cv", "no_job_portal_activity", "low_interview_confidence"],
            ),
            (
                Dimension::Employability,
                &["poor_communication", "time_management", "low_digital_literacy"],
            ),
            (Dimension::Learning, &["low_learning_engagement"]),
            (
                Dimension::Financial,
                &["financial_pressure", "family_dependency", "no_budgeting_skills"],
            ),
            (Dimension::Resilience, &["low_confidence", "poor_resilience"]),
            (
                Dimension::Support,
                &[
                    "limited_social_support",
                    "cultural_constraints",
                    "environmental_instability",
                ],
            ),
        ];

        let rules = table
            .into_iter()
            .map(|(dimension, codes)| {
                (
                    dimension,
                    codes.iter().map(|code| code.to_string()).collect(),
                )
            })
            .collect();
        Self { rules }
    }

    pub fn codes_for(&self, dimension: Dimension) -> &[String] {
        self.rules
            .get(&dimension)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Load-time integrity check that every referenced code exists in the catalog.
    pub fn verify(&self, catalog: &BarrierCatalog) -> Result<(), RuleTableError> {
        let codes: Vec<String> = self
            .rules
            .values()
            .flatten()
            .filter(|code| catalog.find(code).is_none())
            .cloned()
            .collect();

        if codes.is_empty() {
            Ok(())
        } else {
            Err(RuleTableError::UnknownCodes { codes })
        }
    }
}

impl Default for SuggestionRules {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleTableError {
    #[error("suggestion rules reference codes missing from the barrier bank: {}", .codes.join(", "))]
    UnknownCodes { codes: Vec<String> },
}
