use serde::{Deserialize, Serialize};
use std::fmt;

pub const DIMENSION_COUNT: usize = 8;
pub const SUB_COMPONENTS_PER_DIMENSION: usize = 3;

/// The eight fixed employability dimensions a coach assesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Motivation,
    Career,
    Search,
    Employability,
    Learning,
    Financial,
    Resilience,
    Support,
}

impl Dimension {
    pub const fn ordered() -> [Self; DIMENSION_COUNT] {
        [
            Self::Motivation,
            Self::Career,
            Self::Search,
            Self::Employability,
            Self::Learning,
            Self::Financial,
            Self::Resilience,
            Self::Support,
        ]
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Motivation => "motivation",
            Self::Career => "career",
            Self::Search => "search",
            Self::Employability => "employability",
            Self::Learning => "learning",
            Self::Financial => "financial",
            Self::Resilience => "resilience",
            Self::Support => "support",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Motivation => "Mindset & Motivation",
            Self::Career => "Career Awareness & Direction",
            Self::Search => "Job Search Skills & Application",
            Self::Employability => "Employability & Workplace Skills",
            Self::Learning => "Personal Development",
            Self::Financial => "Financial Independence",
            Self::Resilience => "Confidence & Self-Management",
            Self::Support => "Social Support & Environment",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Motivation => "Drive, enthusiasm, and commitment to finding employment",
            Self::Career => "Understanding of career goals and pathways",
            Self::Search => "Ability to search for jobs and prepare applications",
            Self::Employability => "Skills needed to succeed in the workplace",
            Self::Learning => "Willingness to learn and develop new skills",
            Self::Financial => "Financial management and independence",
            Self::Resilience => "Ability to handle setbacks and manage emotions",
            Self::Support => "Support system and environmental stability",
        }
    }

    pub const fn sub_components(
        self,
    ) -> &'static [SubComponentDefinition; SUB_COMPONENTS_PER_DIMENSION] {
        match self {
            Self::Motivation => &MOTIVATION,
            Self::Career => &CAREER,
            Self::Search => &SEARCH,
            Self::Employability => &EMPLOYABILITY,
            Self::Learning => &LEARNING,
            Self::Financial => &FINANCIAL,
            Self::Resilience => &RESILIENCE,
            Self::Support => &SUPPORT,
        }
    }

    /// Position of a sub-component key within this dimension.
    pub fn sub_component_index(self, key: &str) -> Option<usize> {
        self.sub_components()
            .iter()
            .position(|definition| definition.key == key)
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|dimension| dimension.key().eq_ignore_ascii_case(key.trim()))
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A scored facet of a dimension; keys are scoped to the parent dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubComponentDefinition {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

const fn sub(
    key: &'static str,
    title: &'static str,
    description: &'static str,
) -> SubComponentDefinition {
    SubComponentDefinition {
        key,
        title,
        description,
    }
}

const MOTIVATION: [SubComponentDefinition; 3] = [
    sub(
        "to_work",
        "Motivation to Work",
        "Desire to work, urgency, willingness to take action",
    ),
    sub(
        "consistency",
        "Consistency & Resilience",
        "Ability to stay committed, overcome setbacks, follow through",
    ),
    sub(
        "ownership",
        "Personal Ownership",
        "Taking responsibility for job search vs waiting for others",
    ),
];

const CAREER: [SubComponentDefinition; 3] = [
    sub("clarity", "Career Clarity", "Understanding what job they want"),
    sub(
        "sector_awareness",
        "Sector Awareness",
        "Knowing available roles and industry expectations",
    ),
    sub(
        "role_fit",
        "Role Fit Understanding",
        "Understanding day-to-day responsibilities and requirements",
    ),
];

const SEARCH: [SubComponentDefinition; 3] = [
    sub(
        "application_skills",
        "Application Skills",
        "Ability to find, select, and apply for jobs properly",
    ),
    sub(
        "interview_readiness",
        "Interview Readiness",
        "Preparedness and confidence in employer interactions",
    ),
    sub(
        "strategy",
        "Search Strategy & Behaviour",
        "Consistency, methods, quality of job-search practice",
    ),
];

const EMPLOYABILITY: [SubComponentDefinition; 3] = [
    sub(
        "communication",
        "English & Communication Skills",
        "Verbal and written communication ability",
    ),
    sub(
        "digital_skills",
        "Digital Skills",
        "Microsoft Office, email, systems proficiency",
    ),
    sub(
        "workplace",
        "Workplace Behaviours",
        "Punctuality, teamwork, following instructions, adaptability",
    ),
];

const LEARNING: [SubComponentDefinition; 3] = [
    sub(
        "awareness",
        "Self-Awareness",
        "Understanding strengths, weaknesses, and improvement areas",
    ),
    sub(
        "growth_mindset",
        "Growth Mindset / Willingness to Learn",
        "Openness to feedback and training",
    ),
    sub(
        "goal_setting",
        "Goal Setting & Progress Tracking",
        "Ability to set and follow personal or career goals",
    ),
];

const FINANCIAL: [SubComponentDefinition; 3] = [
    sub(
        "pressure",
        "Financial Pressure Level",
        "Urgency to work due to personal or family obligations",
    ),
    sub(
        "expectations",
        "Salary Expectations vs Market Reality",
        "Whether expectations align with job availability",
    ),
    sub(
        "flexibility",
        "Flexibility in Entry-Level Opportunities",
        "Willingness to accept entry-level positions",
    ),
];

const RESILIENCE: [SubComponentDefinition; 3] = [
    sub(
        "confidence",
        "Self-Confidence in Employment Settings",
        "Confidence when applying and interviewing",
    ),
    sub(
        "stress_management",
        "Stress & Emotion Management",
        "Handling setbacks, pressure, or unfamiliar environments",
    ),
    sub(
        "independence",
        "Independence & Responsibility",
        "Ability to manage time, tasks, and expectations independently",
    ),
];

const SUPPORT: [SubComponentDefinition; 3] = [
    sub(
        "family_approval",
        "Family Approval & Support",
        "Especially private sector vs government preferences",
    ),
    sub(
        "cultural",
        "Environmental or Cultural Constraints",
        "Restrictions affecting job type or location",
    ),
    sub(
        "system",
        "Support System Availability",
        "Childcare, transportation, social network",
    ),
];
