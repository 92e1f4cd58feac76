use super::catalog::{BarrierCatalog, BarrierSeverity};
use super::rules::{RuleTableError, SuggestionRules};
use crate::readiness::{Dimension, ReadinessAssessment};
use serde::{Deserialize, Serialize};

/// Suggestions only fire for a dimension scored at or below this value.
pub const SUGGESTION_THRESHOLD: u8 = 3;

/// Advisory barrier proposed for a low-scoring dimension; never persisted by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarrierSuggestion {
    pub code: String,
    pub label: String,
    pub category: String,
    pub severity: BarrierSeverity,
    pub dimension: Dimension,
}

/// Resolves the rule table against a catalog snapshot.
#[derive(Debug, Clone, Default)]
pub struct SuggestionEngine {
    rules: SuggestionRules,
}

impl SuggestionEngine {
    pub fn new(rules: SuggestionRules) -> Self {
        Self { rules }
    }

    /// Builds an engine after checking that every rule code exists in `catalog`.
    pub fn verified(
        rules: SuggestionRules,
        catalog: &BarrierCatalog,
    ) -> Result<Self, RuleTableError> {
        rules.verify(catalog)?;
        Ok(Self::new(rules))
    }

    pub fn rules(&self) -> &SuggestionRules {
        &self.rules
    }

    /// Catalog barriers for `dimension` in rule order, or nothing when `score`
    /// is above [`SUGGESTION_THRESHOLD`]. Codes absent from the catalog are skipped.
    pub fn suggest(
        &self,
        dimension: Dimension,
        score: u8,
        catalog: &BarrierCatalog,
    ) -> Vec<BarrierSuggestion> {
        if score > SUGGESTION_THRESHOLD {
            return Vec::new();
        }

        self.rules
            .codes_for(dimension)
            .iter()
            .filter_map(|code| catalog.find(code))
            .map(|entry| BarrierSuggestion {
                code: entry.code.clone(),
                label: entry.label.clone(),
                category: entry.category.clone(),
                severity: entry.default_severity,
                dimension,
            })
            .collect()
    }

    /// Suggestions for every dimension average of an assessment, in dimension order.
    pub fn suggest_for_assessment(
        &self,
        assessment: &ReadinessAssessment,
        catalog: &BarrierCatalog,
    ) -> Vec<BarrierSuggestion> {
        assessment
            .dimension_averages
            .iter()
            .flat_map(|(dimension, average)| self.suggest(dimension, average, catalog))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readiness::{AssessmentScores, ReadinessEngine, SubComponentScores};
    use std::collections::BTreeMap;

    #[test]
    fn fires_at_threshold_and_not_above() {
        let engine = SuggestionEngine::default();
        let catalog = BarrierCatalog::standard();

        for dimension in Dimension::ordered() {
            assert!(!engine.suggest(dimension, 3, &catalog).is_empty(), "{dimension}");
            assert!(engine.suggest(dimension, 4, &catalog).is_empty(), "{dimension}");
        }
    }

    #[test]
    fn preserves_rule_order_and_catalog_defaults() {
        let engine = SuggestionEngine::default();
        let catalog = BarrierCatalog::standard();

        let suggestions = engine.suggest(Dimension::Financial, 1, &catalog);

        let codes: Vec<_> = suggestions.iter().map(|s| s.code.as_str()).collect();
        assert_eq!(
            codes,
            vec!["financial_pressure", "family_dependency", "no_budgeting_skills"]
        );
        assert_eq!(suggestions[2].severity, BarrierSeverity::Low);
        assert!(suggestions
            .iter()
            .all(|suggestion| suggestion.dimension == Dimension::Financial));
    }

    #[test]
    fn skips_codes_missing_from_catalog() {
        let mut rules = BTreeMap::new();
        rules.insert(
            Dimension::Career,
            vec![
                "limited_work_experience".to_string(),
                "retired_code".to_string(),
                "lack_career_direction".to_string(),
            ],
        );
        let engine = SuggestionEngine::new(SuggestionRules::new(rules));

        let suggestions = engine.suggest(Dimension::Career, 2, &BarrierCatalog::standard());

        let codes: Vec<_> = suggestions.iter().map(|s| s.code.as_str()).collect();
        assert_eq!(codes, vec!["limited_work_experience", "lack_career_direction"]);
    }

    #[test]
    fn verified_rejects_rules_with_unknown_codes() {
        let mut rules = BTreeMap::new();
        rules.insert(Dimension::Career, vec!["retired_code".to_string()]);

        assert!(SuggestionEngine::verified(
            SuggestionRules::new(rules),
            &BarrierCatalog::standard()
        )
        .is_err());
    }

    #[test]
    fn assessment_suggestions_follow_low_averages() {
        let mut scores = SubComponentScores::uniform(6);
        scores.set_dimension(Dimension::Learning, [3, 3, 4]);
        scores.set_dimension(Dimension::Motivation, [2, 3, 2]);
        let assessment =
            ReadinessEngine::default().assess(&AssessmentScores::SubComponentSum(scores));

        let suggestions = SuggestionEngine::default()
            .suggest_for_assessment(&assessment, &BarrierCatalog::standard());

        let codes: Vec<_> = suggestions.iter().map(|s| s.code.as_str()).collect();
        assert_eq!(
            codes,
            vec![
                "low_motivation",
                "unrealistic_expectations",
                "low_learning_engagement"
            ]
        );
    }
}
