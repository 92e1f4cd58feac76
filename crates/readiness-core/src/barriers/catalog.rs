use crate::readiness::Dimension;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BarrierSeverity {
    High,
    Medium,
    Low,
}

impl BarrierSeverity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// Reference entry in the barrier bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarrierBankEntry {
    pub code: String,
    pub label: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub default_severity: BarrierSeverity,
    /// `None` for structural barriers that cut across dimensions.
    #[serde(default)]
    pub dimension: Option<Dimension>,
}

/// Immutable snapshot of the barrier bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BarrierCatalog {
    entries: Vec<BarrierBankEntry>,
}

impl BarrierCatalog {
    pub fn from_entries(entries: Vec<BarrierBankEntry>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.code.as_str()) {
                return Err(CatalogError::DuplicateCode(entry.code.clone()));
            }
        }
        Ok(Self { entries })
    }

    /// Loads a JSON array of [`BarrierBankEntry`] values.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let entries: Vec<BarrierBankEntry> = serde_json::from_reader(reader)?;
        Self::from_entries(entries)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn standard() -> Self {
        let entries = STANDARD_BARRIERS
            .iter()
            .map(
                |(code, label, category, description, default_severity, dimension)| {
                    BarrierBankEntry {
                        code: code.to_string(),
                        label: label.to_string(),
                        category: category.to_string(),
                        description: description.to_string(),
                        default_severity: *default_severity,
                        dimension: *dimension,
                    }
                },
            )
            .collect();
        Self { entries }
    }

    pub fn find(&self, code: &str) -> Option<&BarrierBankEntry> {
        self.entries.iter().find(|entry| entry.code == code)
    }

    pub fn entries(&self) -> &[BarrierBankEntry] {
        &self.entries
    }

    pub fn for_dimension(&self, dimension: Dimension) -> impl Iterator<Item = &BarrierBankEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.dimension == Some(dimension))
    }

    pub fn cross_cutting(&self) -> impl Iterator<Item = &BarrierBankEntry> {
        self.entries.iter().filter(|entry| entry.dimension.is_none())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for BarrierCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read barrier catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid barrier catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("barrier code '{0}' appears more than once")]
    DuplicateCode(String),
}

type SeedEntry = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    BarrierSeverity,
    Option<Dimension>,
);

const STANDARD_BARRIERS: [SeedEntry; 23] = [
    (
        "low_motivation",
        "Low Motivation",
        "Mindset",
        "Participant shows limited drive or enthusiasm for job seeking",
        BarrierSeverity::Medium,
        Some(Dimension::Motivation),
    ),
    (
        "unrealistic_expectations",
        "Unrealistic Expectations",
        "Mindset",
        "Participant has expectations misaligned with market reality",
        BarrierSeverity::Medium,
        Some(Dimension::Motivation),
    ),
    (
        "low_confidence",
        "Anxiety / Low Confidence",
        "Mindset",
        "Participant exhibits anxiety or low self-confidence",
        BarrierSeverity::High,
        Some(Dimension::Resilience),
    ),
    (
        "poor_resilience",
        "Poor Resilience",
        "Mindset",
        "Participant struggles with setbacks and rejection",
        BarrierSeverity::Medium,
        Some(Dimension::Resilience),
    ),
    (
        "lack_career_direction",
        "Lack of Career Direction",
        "Career",
        "Participant unclear about career goals or pathway",
        BarrierSeverity::High,
        Some(Dimension::Career),
    ),
    (
        "limited_work_experience",
        "Limited Work Experience",
        "Career",
        "Participant has minimal or no work experience",
        BarrierSeverity::Medium,
        Some(Dimension::Career),
    ),
    (
        "no_cv",
        "No CV / Poor CV",
        "Job Search",
        "Participant lacks a CV or has a poorly structured CV",
        BarrierSeverity::High,
        Some(Dimension::Search),
    ),
    (
        "no_job_portal_activity",
        "No Job Portal Activity",
        "Job Search",
        "Participant not actively using job portals",
        BarrierSeverity::High,
        Some(Dimension::Search),
    ),
    (
        "low_interview_confidence",
        "Low Interview Confidence",
        "Job Search",
        "Participant lacks confidence in interview situations",
        BarrierSeverity::Medium,
        Some(Dimension::Search),
    ),
    (
        "low_digital_literacy",
        "Low Digital Literacy",
        "Job Search",
        "Participant has limited digital/computer skills",
        BarrierSeverity::Medium,
        Some(Dimension::Employability),
    ),
    (
        "poor_communication",
        "Poor Communication Skills",
        "Employability",
        "Participant struggles with verbal or written communication",
        BarrierSeverity::High,
        Some(Dimension::Employability),
    ),
    (
        "time_management",
        "Time Management Challenges",
        "Employability",
        "Participant has difficulty managing time effectively",
        BarrierSeverity::Medium,
        Some(Dimension::Employability),
    ),
    (
        "low_learning_engagement",
        "Low Engagement in Learning",
        "Learning",
        "Participant shows limited interest in upskilling",
        BarrierSeverity::Medium,
        Some(Dimension::Learning),
    ),
    (
        "financial_pressure",
        "Financial Pressure",
        "Financial",
        "Participant under significant financial stress",
        BarrierSeverity::High,
        Some(Dimension::Financial),
    ),
    (
        "family_dependency",
        "Family Dependency",
        "Financial",
        "Participant has dependents relying on their income",
        BarrierSeverity::Medium,
        Some(Dimension::Financial),
    ),
    (
        "no_budgeting_skills",
        "No Budgeting Skills",
        "Financial",
        "Participant lacks financial planning skills",
        BarrierSeverity::Low,
        Some(Dimension::Financial),
    ),
    (
        "childcare_responsibilities",
        "Childcare Responsibilities",
        "Structural",
        "Participant constrained by childcare duties",
        BarrierSeverity::High,
        None,
    ),
    (
        "transport_issues",
        "Transport Issues",
        "Structural",
        "Participant has limited access to transportation",
        BarrierSeverity::Medium,
        None,
    ),
    (
        "caregiving_responsibilities",
        "Caregiving Responsibilities",
        "Structural",
        "Participant responsible for caring for family members",
        BarrierSeverity::High,
        None,
    ),
    (
        "health_limitations",
        "Health-Related Limitations",
        "Structural",
        "Participant has health issues affecting employment",
        BarrierSeverity::High,
        None,
    ),
    (
        "limited_social_support",
        "Limited Social Support",
        "Social Support",
        "Participant has weak family/friend support network",
        BarrierSeverity::Medium,
        Some(Dimension::Support),
    ),
    (
        "cultural_constraints",
        "Cultural Constraints",
        "Social Support",
        "Participant faces cultural barriers to employment",
        BarrierSeverity::Medium,
        Some(Dimension::Support),
    ),
    (
        "environmental_instability",
        "Environmental Instability",
        "Social Support",
        "Participant has unstable home/living situation",
        BarrierSeverity::High,
        Some(Dimension::Support),
    ),
];
