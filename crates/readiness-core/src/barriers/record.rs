use super::catalog::{BarrierBankEntry, BarrierSeverity};
use super::suggestions::BarrierSuggestion;
use crate::readiness::Dimension;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarrierSource {
    /// Accepted from an engine suggestion.
    Auto,
    /// Added freely by the coach.
    #[default]
    Manual,
}

impl BarrierSource {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Manual => "manual",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarrierStatus {
    #[default]
    Active,
    Resolved,
}

impl BarrierStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Resolved => "resolved",
        }
    }
}

/// Concrete barrier attached to a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarrierRecord {
    pub code: String,
    pub label: String,
    pub category: String,
    pub dimension: Option<Dimension>,
    pub severity: BarrierSeverity,
    pub source: BarrierSource,
    #[serde(default)]
    pub status: BarrierStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl BarrierRecord {
    pub fn from_entry(
        entry: &BarrierBankEntry,
        severity: Option<BarrierSeverity>,
        source: BarrierSource,
        notes: Option<String>,
    ) -> Self {
        Self {
            code: entry.code.clone(),
            label: entry.label.clone(),
            category: entry.category.clone(),
            dimension: entry.dimension,
            severity: severity.unwrap_or(entry.default_severity),
            source,
            status: BarrierStatus::Active,
            notes,
        }
    }

    pub fn from_suggestion(suggestion: &BarrierSuggestion) -> Self {
        Self {
            code: suggestion.code.clone(),
            label: suggestion.label.clone(),
            category: suggestion.category.clone(),
            dimension: Some(suggestion.dimension),
            severity: suggestion.severity,
            source: BarrierSource::Auto,
            status: BarrierStatus::Active,
            notes: None,
        }
    }
}

/// A session's barriers, unique by catalog code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<BarrierRecord>", into = "Vec<BarrierRecord>")]
pub struct BarrierList {
    records: Vec<BarrierRecord>,
}

/// Keeps the first record for each code.
impl From<Vec<BarrierRecord>> for BarrierList {
    fn from(records: Vec<BarrierRecord>) -> Self {
        let mut list = Self::new();
        for record in records {
            list.insert(record);
        }
        list
    }
}

impl From<BarrierList> for Vec<BarrierRecord> {
    fn from(list: BarrierList) -> Self {
        list.records
    }
}

impl BarrierList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.records.iter().any(|record| record.code == code)
    }

    /// Adds `record` unless its code is already present; returns whether it was added.
    pub fn insert(&mut self, record: BarrierRecord) -> bool {
        if self.contains(&record.code) {
            return false;
        }
        self.records.push(record);
        true
    }

    pub fn accept(&mut self, suggestion: &BarrierSuggestion) -> bool {
        self.insert(BarrierRecord::from_suggestion(suggestion))
    }

    pub fn add_manual(
        &mut self,
        entry: &BarrierBankEntry,
        severity: Option<BarrierSeverity>,
        notes: Option<String>,
    ) -> bool {
        self.insert(BarrierRecord::from_entry(
            entry,
            severity,
            BarrierSource::Manual,
            notes,
        ))
    }

    pub fn resolve(&mut self, code: &str) -> bool {
        match self.records.iter_mut().find(|record| record.code == code) {
            Some(record) => {
                record.status = BarrierStatus::Resolved;
                true
            }
            None => false,
        }
    }

    pub fn records(&self) -> &[BarrierRecord] {
        &self.records
    }

    pub fn active(&self) -> impl Iterator<Item = &BarrierRecord> {
        self.records
            .iter()
            .filter(|record| record.status == BarrierStatus::Active)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::barriers::{BarrierCatalog, SuggestionEngine};

    #[test]
    fn accepting_a_suggestion_twice_is_a_no_op() {
        let catalog = BarrierCatalog::standard();
        let suggestions = SuggestionEngine::default().suggest(Dimension::Resilience, 2, &catalog);
        let mut list = BarrierList::new();

        assert!(list.accept(&suggestions[0]));
        assert!(!list.accept(&suggestions[0]));
        assert_eq!(list.len(), 1);
        assert_eq!(list.records()[0].source, BarrierSource::Auto);
    }

    #[test]
    fn manual_entry_with_existing_code_is_ignored() {
        let catalog = BarrierCatalog::standard();
        let entry = catalog.find("low_confidence").expect("entry present");
        let suggestion = SuggestionEngine::default()
            .suggest(Dimension::Resilience, 1, &catalog)
            .remove(0);
        let mut list = BarrierList::new();

        assert!(list.accept(&suggestion));
        assert!(!list.add_manual(entry, Some(BarrierSeverity::Low), None));
        assert_eq!(list.records()[0].severity, BarrierSeverity::High);
    }

    #[test]
    fn manual_entries_keep_coach_severity_and_cross_cutting_dimension() {
        let catalog = BarrierCatalog::standard();
        let entry = catalog.find("transport_issues").expect("entry present");
        let mut list = BarrierList::new();

        assert!(list.add_manual(
            entry,
            Some(BarrierSeverity::High),
            Some("two bus changes".to_string())
        ));

        let record = &list.records()[0];
        assert_eq!(record.severity, BarrierSeverity::High);
        assert_eq!(record.dimension, None);
        assert_eq!(record.source, BarrierSource::Manual);
    }

    #[test]
    fn stored_lists_drop_repeated_codes_when_loaded() {
        let json = serde_json::json!([
            {"code": "no_cv", "label": "No CV / Poor CV", "category": "Job Search",
             "dimension": "search", "severity": "High", "source": "auto"},
            {"code": "no_cv", "label": "No CV / Poor CV", "category": "Job Search",
             "dimension": "search", "severity": "Low", "source": "manual"},
            {"code": "transport_issues", "label": "Transport Issues", "category": "Structural",
             "dimension": null, "severity": "Medium", "source": "manual", "status": "resolved"}
        ]);

        let list: BarrierList = serde_json::from_value(json).expect("list parses");

        assert_eq!(list.len(), 2);
        assert_eq!(list.records()[0].severity, BarrierSeverity::High);
        assert_eq!(list.records()[1].status, BarrierStatus::Resolved);

        let round_trip = serde_json::to_value(&list).expect("serializes");
        assert_eq!(round_trip.as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn resolve_marks_status_and_drops_from_active() {
        let catalog = BarrierCatalog::standard();
        let mut list = BarrierList::new();
        list.add_manual(
            catalog.find("no_cv").expect("entry present"),
            None,
            None,
        );

        assert!(list.resolve("no_cv"));
        assert!(!list.resolve("health_limitations"));
        assert_eq!(list.active().count(), 0);
        assert_eq!(list.records()[0].status, BarrierStatus::Resolved);
    }
}
