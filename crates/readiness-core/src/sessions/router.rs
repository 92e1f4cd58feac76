use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{ScoreInput, SessionId, SessionSubmission};
use super::repository::{RepositoryError, SessionRepository};
use super::service::{SessionService, SessionServiceError};

/// Router builder exposing session save/lookup, stateless scoring, and the barrier bank.
pub fn session_router<R>(service: Arc<SessionService<R>>) -> Router
where
    R: SessionRepository + 'static,
{
    Router::new()
        .route("/api/v1/sessions", post(save_handler::<R>))
        .route("/api/v1/sessions/:session_id", get(session_handler::<R>))
        .route(
            "/api/v1/sessions/:session_id/suggestions",
            get(suggestions_handler::<R>),
        )
        .route("/api/v1/readiness/assess", post(assess_handler::<R>))
        .route("/api/v1/barriers/catalog", get(catalog_handler::<R>))
        .with_state(service)
}

pub(crate) async fn save_handler<R>(
    State(service): State<Arc<SessionService<R>>>,
    axum::Json(submission): axum::Json<SessionSubmission>,
) -> Response
where
    R: SessionRepository + 'static,
{
    let status = if submission.session_id.is_some() {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };

    match service.save(submission) {
        Ok(record) => (status, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn session_handler<R>(
    State(service): State<Arc<SessionService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.get(&SessionId(session_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn suggestions_handler<R>(
    State(service): State<Arc<SessionService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    let id = SessionId(session_id);
    match service.suggestions(&id) {
        Ok(suggestions) => {
            let payload = json!({
                "session_id": id.0,
                "suggestions": suggestions,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn assess_handler<R>(
    State(service): State<Arc<SessionService<R>>>,
    axum::Json(input): axum::Json<ScoreInput>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.assess(input) {
        Ok(preview) => (StatusCode::OK, axum::Json(preview)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn catalog_handler<R>(State(service): State<Arc<SessionService<R>>>) -> Response
where
    R: SessionRepository + 'static,
{
    (StatusCode::OK, axum::Json(service.catalog().clone())).into_response()
}

pub(crate) fn error_response(error: SessionServiceError) -> Response {
    let status = match &error {
        error if error.is_validation() => StatusCode::UNPROCESSABLE_ENTITY,
        SessionServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        SessionServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
