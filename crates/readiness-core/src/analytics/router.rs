use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;

use super::export::{barriers_csv, sessions_csv, ExportError};
use super::views::AnalyticsSummary;
use crate::sessions::router::error_response;
use crate::sessions::{SessionRecord, SessionRepository, SessionService};

/// Router builder exposing the analytics summary and CSV exports.
pub fn analytics_router<R>(service: Arc<SessionService<R>>) -> Router
where
    R: SessionRepository + 'static,
{
    Router::new()
        .route("/api/v1/analytics/summary", get(summary_handler::<R>))
        .route("/api/v1/exports/sessions.csv", get(sessions_export_handler::<R>))
        .route("/api/v1/exports/barriers.csv", get(barriers_export_handler::<R>))
        .with_state(service)
}

pub(crate) async fn summary_handler<R>(State(service): State<Arc<SessionService<R>>>) -> Response
where
    R: SessionRepository + 'static,
{
    match service.sessions() {
        Ok(sessions) => {
            let summary = AnalyticsSummary::from_sessions(&sessions, service.catalog());
            (StatusCode::OK, axum::Json(summary)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn sessions_export_handler<R>(
    State(service): State<Arc<SessionService<R>>>,
) -> Response
where
    R: SessionRepository + 'static,
{
    export_response(service.as_ref(), "sessions.csv", sessions_csv)
}

pub(crate) async fn barriers_export_handler<R>(
    State(service): State<Arc<SessionService<R>>>,
) -> Response
where
    R: SessionRepository + 'static,
{
    export_response(service.as_ref(), "barriers.csv", barriers_csv)
}

fn export_response<R>(
    service: &SessionService<R>,
    filename: &str,
    render: fn(&[SessionRecord]) -> Result<String, ExportError>,
) -> Response
where
    R: SessionRepository + 'static,
{
    let sessions = match service.sessions() {
        Ok(sessions) => sessions,
        Err(error) => return error_response(error),
    };

    match render(&sessions) {
        Ok(body) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{filename}\""),
                ),
            ],
            body,
        )
            .into_response(),
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
