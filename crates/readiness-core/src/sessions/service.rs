use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};

use super::domain::{BarrierSelection, ScoreInput, SessionId, SessionRecord, SessionSubmission};
use super::repository::{RepositoryError, SessionRepository};
use crate::barriers::{
    BarrierCatalog, BarrierList, BarrierRecord, BarrierSuggestion, RuleTableError,
    SuggestionEngine, SuggestionRules,
};
use crate::readiness::{AssessmentError, ReadinessAssessment, ReadinessEngine};

/// Service composing the readiness engine, suggestion rules, and session storage.
pub struct SessionService<R> {
    repository: Arc<R>,
    engine: Arc<ReadinessEngine>,
    suggestions: Arc<SuggestionEngine>,
    catalog: Arc<BarrierCatalog>,
}

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> SessionId {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!("session-{id:06}"))
}

/// Stateless scoring result returned before anything is stored.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentPreview {
    #[serde(flatten)]
    pub assessment: ReadinessAssessment,
    pub percentage: u8,
    pub summary: String,
    pub suggestions: Vec<BarrierSuggestion>,
}

impl<R> SessionService<R>
where
    R: SessionRepository + 'static,
{
    /// Fails when `rules` reference codes missing from `catalog`.
    pub fn new(
        repository: Arc<R>,
        engine: ReadinessEngine,
        catalog: BarrierCatalog,
        rules: SuggestionRules,
    ) -> Result<Self, SessionServiceError> {
        let suggestions = SuggestionEngine::verified(rules, &catalog)?;
        Ok(Self {
            repository,
            engine: Arc::new(engine),
            suggestions: Arc::new(suggestions),
            catalog: Arc::new(catalog),
        })
    }

    /// Standard weights, barrier bank, and rule table.
    pub fn standard(repository: Arc<R>) -> Self {
        Self {
            repository,
            engine: Arc::new(ReadinessEngine::default()),
            suggestions: Arc::new(SuggestionEngine::default()),
            catalog: Arc::new(BarrierCatalog::standard()),
        }
    }

    pub fn catalog(&self) -> &BarrierCatalog {
        &self.catalog
    }

    pub fn engine(&self) -> &ReadinessEngine {
        &self.engine
    }

    /// Score, classify, and persist a coaching session, creating or updating it.
    pub fn save(
        &self,
        submission: SessionSubmission,
    ) -> Result<SessionRecord, SessionServiceError> {
        if !submission.consent_obtained {
            return Err(SessionServiceError::ConsentMissing);
        }

        let scores = submission.scores.into_scores()?;
        let assessment = self.engine.assess(&scores);
        let barriers = self.resolve_barriers(&submission.barriers)?;
        let now = Utc::now();

        let (session_id, created_at) = match submission.session_id {
            Some(session_id) => {
                let existing = self
                    .repository
                    .fetch(&session_id)?
                    .ok_or(RepositoryError::NotFound)?;
                if existing.participant_id != submission.participant_id {
                    return Err(SessionServiceError::ParticipantMismatch {
                        session_id: session_id.0,
                    });
                }
                (session_id, Some(existing.created_at))
            }
            None => (next_session_id(), None),
        };

        let record = SessionRecord {
            session_id,
            participant_id: submission.participant_id,
            session_type: submission.session_type,
            consent_obtained: submission.consent_obtained,
            scores,
            assessment,
            dimension_notes: submission.dimension_notes,
            notes: submission.notes,
            goals: submission.goals,
            barriers,
            created_at: created_at.unwrap_or(now),
            updated_at: now,
        };

        let stored = if created_at.is_some() {
            self.repository.update(record.clone())?;
            record
        } else {
            self.repository.insert(record)?
        };

        info!(
            session_id = %stored.session_id.0,
            participant_id = %stored.participant_id.0,
            model = %stored.model(),
            readiness_index = stored.readiness_index(),
            category = %stored.readiness_category(),
            barriers = stored.barriers.len(),
            updated = created_at.is_some(),
            "saved coaching session"
        );

        Ok(stored)
    }

    pub fn get(&self, session_id: &SessionId) -> Result<SessionRecord, SessionServiceError> {
        let record = self
            .repository
            .fetch(session_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Current suggestions for a stored session, minus barriers it already records.
    pub fn suggestions(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<BarrierSuggestion>, SessionServiceError> {
        let record = self.get(session_id)?;
        let suggestions = self
            .suggestions
            .suggest_for_assessment(&record.assessment, &self.catalog)
            .into_iter()
            .filter(|suggestion| !record.barriers.contains(&suggestion.code))
            .collect();
        Ok(suggestions)
    }

    /// Scores `input` and lists suggestions without touching the repository.
    pub fn assess(&self, input: ScoreInput) -> Result<AssessmentPreview, SessionServiceError> {
        let scores = input.into_scores()?;
        let assessment = self.engine.assess(&scores);
        let suggestions = self
            .suggestions
            .suggest_for_assessment(&assessment, &self.catalog);

        Ok(AssessmentPreview {
            percentage: assessment.percentage(),
            summary: assessment.summary(),
            assessment,
            suggestions,
        })
    }

    pub fn sessions(&self) -> Result<Vec<SessionRecord>, SessionServiceError> {
        Ok(self.repository.list()?)
    }

    fn resolve_barriers(
        &self,
        selections: &[BarrierSelection],
    ) -> Result<BarrierList, SessionServiceError> {
        let mut barriers = BarrierList::new();
        for selection in selections {
            let entry = self
                .catalog
                .find(&selection.code)
                .ok_or_else(|| SessionServiceError::UnknownBarrier(selection.code.clone()))?;
            let record = BarrierRecord::from_entry(
                entry,
                selection.severity,
                selection.source,
                selection.notes.clone(),
            );
            if !barriers.insert(record) {
                debug!(code = %selection.code, "ignoring duplicate barrier selection");
            }
        }
        Ok(barriers)
    }
}

/// Error raised by the session service.
#[derive(Debug, thiserror::Error)]
pub enum SessionServiceError {
    #[error("participant consent is required before a session can be saved")]
    ConsentMissing,
    #[error(transparent)]
    Assessment(#[from] AssessmentError),
    #[error("barrier code '{0}' is not in the barrier bank")]
    UnknownBarrier(String),
    #[error("session {session_id} belongs to a different participant")]
    ParticipantMismatch { session_id: String },
    #[error(transparent)]
    RuleTable(#[from] RuleTableError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl SessionServiceError {
    /// Whether the caller sent something that can never be saved as-is.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ConsentMissing
                | Self::Assessment(_)
                | Self::UnknownBarrier(_)
                | Self::ParticipantMismatch { .. }
        )
    }
}
