use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::barriers::{BarrierList, BarrierSeverity, BarrierSource};
use crate::readiness::{
    AssessmentError, AssessmentScores, Dimension, DimensionScores, ReadinessAssessment,
    ReadinessCategory, ScoringModel, SubComponentInput, SubComponentScores,
};

/// Identifier wrapper for stored coaching sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticipantId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    #[default]
    Baseline,
    FollowUp,
}

impl SessionType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Baseline => "Baseline",
            Self::FollowUp => "Follow-up",
        }
    }
}

/// Raw score payload as posted by a coach, keyed by dimension (and sub-component key).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "model", content = "scores", rename_all = "snake_case")]
pub enum ScoreInput {
    WeightedPercentage(BTreeMap<Dimension, u8>),
    SubComponentSum(SubComponentInput),
}

impl ScoreInput {
    pub fn model(&self) -> ScoringModel {
        match self {
            Self::WeightedPercentage(_) => ScoringModel::WeightedPercentage,
            Self::SubComponentSum(_) => ScoringModel::SubComponentSum,
        }
    }

    /// Rejects incomplete or out-of-range input; nothing is zero-filled here.
    pub fn into_scores(self) -> Result<AssessmentScores, AssessmentError> {
        let scores = match &self {
            Self::WeightedPercentage(direct) => {
                AssessmentScores::WeightedPercentage(DimensionScores::from_complete(direct)?)
            }
            Self::SubComponentSum(input) => {
                AssessmentScores::SubComponentSum(SubComponentScores::from_complete(input)?)
            }
        };
        scores.validate()?;
        Ok(scores)
    }
}

/// Barrier chosen by the coach, resolved against the catalog on save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarrierSelection {
    pub code: String,
    #[serde(default)]
    pub severity: Option<BarrierSeverity>,
    #[serde(default)]
    pub source: BarrierSource,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionGoals {
    #[serde(default)]
    pub short_term_goal_1: Option<String>,
    #[serde(default)]
    pub short_term_goal_2: Option<String>,
    #[serde(default)]
    pub long_term_goal: Option<String>,
    #[serde(default)]
    pub next_touchpoint: Option<NaiveDate>,
}

/// Payload accepted by the session-save operation. A `session_id` turns the save into an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSubmission {
    #[serde(default)]
    pub session_id: Option<SessionId>,
    pub participant_id: ParticipantId,
    #[serde(default)]
    pub session_type: SessionType,
    #[serde(default)]
    pub consent_obtained: bool,
    pub scores: ScoreInput,
    #[serde(default)]
    pub dimension_notes: BTreeMap<Dimension, String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub goals: SessionGoals,
    #[serde(default)]
    pub barriers: Vec<BarrierSelection>,
}

/// Stored session: raw scores plus the derived values computed at save time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub session_id: SessionId,
    pub participant_id: ParticipantId,
    pub session_type: SessionType,
    pub consent_obtained: bool,
    pub scores: AssessmentScores,
    pub assessment: ReadinessAssessment,
    pub dimension_notes: BTreeMap<Dimension, String>,
    pub notes: Option<String>,
    pub goals: SessionGoals,
    pub barriers: BarrierList,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn model(&self) -> ScoringModel {
        self.assessment.model
    }

    pub fn readiness_index(&self) -> u32 {
        self.assessment.readiness_index
    }

    pub fn readiness_category(&self) -> ReadinessCategory {
        self.assessment.readiness_category
    }

    pub fn status_view(&self) -> SessionSummaryView {
        SessionSummaryView {
            session_id: self.session_id.clone(),
            participant_id: self.participant_id.clone(),
            session_type: self.session_type.label(),
            scoring_model: self.model().key(),
            readiness_index: self.readiness_index(),
            readiness_category: self.readiness_category().code(),
            category_label: self.readiness_category().label(),
            summary: self.assessment.summary(),
            barrier_count: self.barriers.len(),
            updated_at: self.updated_at,
        }
    }
}

/// Response body for session save and lookup.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummaryView {
    pub session_id: SessionId,
    pub participant_id: ParticipantId,
    pub session_type: &'static str,
    pub scoring_model: &'static str,
    pub readiness_index: u32,
    pub readiness_category: &'static str,
    pub category_label: &'static str,
    pub summary: String,
    pub barrier_count: usize,
    pub updated_at: DateTime<Utc>,
}
