use super::common::*;
use crate::barriers::{
    BarrierCatalog, BarrierSeverity, BarrierSource, BarrierStatus, SuggestionRules,
};
use crate::readiness::{
    AssessmentError, Dimension, ReadinessCategory, ReadinessEngine, ScoringModel,
};
use crate::sessions::domain::{ParticipantId, SessionId, SessionType};
use crate::sessions::repository::{RepositoryError, SessionRepository};
use crate::sessions::{SessionService, SessionServiceError};
use std::collections::BTreeMap;
use std::sync::Arc;

#[test]
fn save_scores_and_persists_new_sessions() {
    let (service, repository) = build_service();

    let record = service.save(submission("p-001")).expect("save succeeds");

    assert!(record.session_id.0.starts_with("session-"));
    assert_eq!(record.model(), ScoringModel::SubComponentSum);
    assert_eq!(record.readiness_index(), 125);
    assert_eq!(record.readiness_category(), ReadinessCategory::B);
    assert_eq!(record.assessment.dimension_averages.get(Dimension::Learning), 3);
    assert_eq!(record.created_at, record.updated_at);

    let stored = repository
        .fetch(&record.session_id)
        .expect("fetch succeeds")
        .expect("record present");
    assert_eq!(stored, record);
}

#[test]
fn save_resolves_barriers_against_the_catalog() {
    let (service, _) = build_service();
    let mut submission = submission("p-002");
    submission.barriers.push(selection("low_motivation"));
    submission.barriers[1].severity = Some(BarrierSeverity::High);

    let record = service.save(submission).expect("save succeeds");

    let codes: Vec<_> = record
        .barriers
        .records()
        .iter()
        .map(|barrier| barrier.code.as_str())
        .collect();
    assert_eq!(codes, vec!["low_motivation", "transport_issues"]);

    let transport = &record.barriers.records()[1];
    assert_eq!(transport.severity, BarrierSeverity::High);
    assert_eq!(transport.dimension, None);
    assert_eq!(transport.source, BarrierSource::Manual);
    assert_eq!(transport.status, BarrierStatus::Active);
}

#[test]
fn save_rejects_unknown_barrier_codes() {
    let (service, repository) = build_service();
    let mut submission = submission("p-003");
    submission.barriers.push(selection("retired_code"));

    match service.save(submission) {
        Err(SessionServiceError::UnknownBarrier(code)) => assert_eq!(code, "retired_code"),
        other => panic!("expected unknown barrier error, got {other:?}"),
    }
    assert!(repository.list().expect("list succeeds").is_empty());
}

#[test]
fn save_requires_consent() {
    let (service, _) = build_service();
    let mut submission = submission("p-004");
    submission.consent_obtained = false;

    let error = service.save(submission).expect_err("consent missing");
    assert!(matches!(error, SessionServiceError::ConsentMissing));
    assert!(error.is_validation());
}

#[test]
fn save_rejects_incomplete_scores() {
    let (service, _) = build_service();
    let mut input = sub_component_input(5);
    input.remove(&Dimension::Support);
    let mut submission = submission("p-005");
    submission.scores = crate::sessions::ScoreInput::SubComponentSum(input);

    match service.save(submission) {
        Err(SessionServiceError::Assessment(AssessmentError::Incomplete { missing })) => {
            assert_eq!(
                missing,
                vec!["support.family_approval", "support.cultural", "support.system"]
            );
        }
        other => panic!("expected incomplete assessment, got {other:?}"),
    }
}

#[test]
fn update_keeps_created_at_and_replaces_barriers() {
    let (service, repository) = build_service();
    let first = service.save(submission("p-006")).expect("first save");

    let mut follow_up = submission("p-006");
    follow_up.session_id = Some(first.session_id.clone());
    follow_up.session_type = SessionType::FollowUp;
    follow_up.scores = weighted_scores(6);
    follow_up.barriers = vec![selection("no_cv")];

    let updated = service.save(follow_up).expect("update succeeds");

    assert_eq!(updated.session_id, first.session_id);
    assert_eq!(updated.created_at, first.created_at);
    assert!(updated.updated_at >= first.updated_at);
    assert_eq!(updated.model(), ScoringModel::WeightedPercentage);
    assert_eq!(updated.readiness_index(), 86);
    assert_eq!(updated.readiness_category(), ReadinessCategory::A);
    assert_eq!(updated.barriers.len(), 1);
    assert!(updated.barriers.contains("no_cv"));
    assert_eq!(repository.list().expect("list succeeds").len(), 1);
}

#[test]
fn update_rejects_a_different_participant() {
    let (service, _) = build_service();
    let first = service.save(submission("p-007")).expect("first save");

    let mut other = submission("p-008");
    other.session_id = Some(first.session_id.clone());

    assert!(matches!(
        service.save(other),
        Err(SessionServiceError::ParticipantMismatch { .. })
    ));
}

#[test]
fn update_of_missing_session_is_not_found() {
    let (service, _) = build_service();
    let mut submission = submission("p-009");
    submission.session_id = Some(SessionId("session-missing".to_string()));

    match service.save(submission) {
        Err(SessionServiceError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn suggestions_exclude_recorded_barriers() {
    let (service, _) = build_service();
    let record = service.save(submission("p-010")).expect("save succeeds");

    let suggestions = service
        .suggestions(&record.session_id)
        .expect("suggestions load");

    let codes: Vec<_> = suggestions.iter().map(|s| s.code.as_str()).collect();
    assert_eq!(codes, vec!["unrealistic_expectations", "low_learning_engagement"]);
}

#[test]
fn assess_previews_without_persisting() {
    let (service, repository) = build_service();

    let preview = service.assess(scores()).expect("assessment succeeds");

    assert_eq!(preview.assessment.readiness_index, 125);
    assert_eq!(preview.percentage, 74);
    assert_eq!(preview.suggestions.len(), 3);
    assert!(repository.list().expect("list succeeds").is_empty());
}

#[test]
fn get_propagates_not_found() {
    let (service, _) = build_service();

    match service.get(&SessionId("missing".to_string())) {
        Err(SessionServiceError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected not found error, got {other:?}"),
    }
}

#[test]
fn new_refuses_rules_that_reference_unknown_codes() {
    let mut rules = BTreeMap::new();
    rules.insert(Dimension::Career, vec!["retired_code".to_string()]);

    let result = SessionService::new(
        Arc::new(MemoryRepository::default()),
        ReadinessEngine::default(),
        BarrierCatalog::standard(),
        SuggestionRules::new(rules),
    );

    assert!(matches!(result, Err(SessionServiceError::RuleTable(_))));
}

#[test]
fn repository_failures_are_not_validation_errors() {
    let service = SessionService::standard(Arc::new(UnavailableRepository));

    let error = service.save(submission("p-011")).expect_err("repository offline");
    assert!(matches!(
        error,
        SessionServiceError::Repository(RepositoryError::Unavailable(_))
    ));
    assert!(!error.is_validation());
}

#[test]
fn status_view_reports_labels() {
    let (service, _) = build_service();
    let record = service.save(submission("p-012")).expect("save succeeds");

    let view = record.status_view();

    assert_eq!(view.participant_id, ParticipantId("p-012".to_string()));
    assert_eq!(view.scoring_model, "sub_component_sum");
    assert_eq!(view.readiness_category, "B");
    assert_eq!(view.category_label, "Close to work-ready");
    assert_eq!(view.barrier_count, 2);
}
