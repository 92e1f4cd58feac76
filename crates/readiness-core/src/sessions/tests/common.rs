use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::readiness::{Dimension, SubComponentInput};
use crate::sessions::domain::{
    BarrierSelection, ParticipantId, ScoreInput, SessionGoals, SessionId, SessionRecord,
    SessionSubmission, SessionType,
};
use crate::sessions::repository::{RepositoryError, SessionRepository};
use crate::sessions::{session_router, SessionService};

pub(super) fn sub_component_input(score: u8) -> SubComponentInput {
    Dimension::ordered()
        .into_iter()
        .map(|dimension| {
            let values = dimension
                .sub_components()
                .iter()
                .map(|definition| (definition.key.to_string(), score))
                .collect();
            (dimension, values)
        })
        .collect()
}

pub(super) fn set_sub_components(
    input: &mut SubComponentInput,
    dimension: Dimension,
    scores: [u8; 3],
) {
    let values = dimension
        .sub_components()
        .iter()
        .zip(scores)
        .map(|(definition, value)| (definition.key.to_string(), value))
        .collect();
    input.insert(dimension, values);
}

/// Strong participant held back by motivation and learning (index 125, category B).
pub(super) fn scores() -> ScoreInput {
    let mut input = sub_component_input(6);
    set_sub_components(&mut input, Dimension::Motivation, [2, 3, 2]);
    set_sub_components(&mut input, Dimension::Learning, [3, 3, 4]);
    ScoreInput::SubComponentSum(input)
}

pub(super) fn weighted_scores(score: u8) -> ScoreInput {
    let direct: BTreeMap<Dimension, u8> = Dimension::ordered()
        .into_iter()
        .map(|dimension| (dimension, score))
        .collect();
    ScoreInput::WeightedPercentage(direct)
}

pub(super) fn submission(participant: &str) -> SessionSubmission {
    SessionSubmission {
        session_id: None,
        participant_id: ParticipantId(participant.to_string()),
        session_type: SessionType::Baseline,
        consent_obtained: true,
        scores: scores(),
        dimension_notes: BTreeMap::from([(
            Dimension::Motivation,
            "Unsure whether work pays more than benefits".to_string(),
        )]),
        notes: Some("First meeting at the community centre".to_string()),
        goals: SessionGoals {
            short_term_goal_1: Some("Draft a CV".to_string()),
            ..SessionGoals::default()
        },
        barriers: vec![
            selection("low_motivation"),
            selection("transport_issues"),
        ],
    }
}

pub(super) fn selection(code: &str) -> BarrierSelection {
    BarrierSelection {
        code: code.to_string(),
        severity: None,
        source: Default::default(),
        notes: None,
    }
}

pub(super) fn build_service() -> (SessionService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = SessionService::standard(repository.clone());
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<SessionId, SessionRecord>>>,
}

impl SessionRepository for MemoryRepository {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.session_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.session_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: SessionRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.session_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<SessionRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut records: Vec<_> = guard.values().cloned().collect();
        records.sort_by(|a, b| b.session_id.cmp(&a.session_id));
        Ok(records)
    }
}

pub(super) struct ConflictRepository;

impl SessionRepository for ConflictRepository {
    fn insert(&self, _record: SessionRecord) -> Result<SessionRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _record: SessionRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(&self, _id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError> {
        Ok(None)
    }

    fn list(&self) -> Result<Vec<SessionRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl SessionRepository for UnavailableRepository {
    fn insert(&self, _record: SessionRecord) -> Result<SessionRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: SessionRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<SessionRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn session_router_with_service(
    service: SessionService<MemoryRepository>,
) -> axum::Router {
    session_router(Arc::new(service))
}
