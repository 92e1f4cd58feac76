//! Coaching session intake: validation, scoring at save time, barrier resolution, and storage.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    BarrierSelection, ParticipantId, ScoreInput, SessionGoals, SessionId, SessionRecord,
    SessionSubmission, SessionSummaryView, SessionType,
};
pub use repository::{RepositoryError, SessionRepository};
pub use router::session_router;
pub use service::{AssessmentPreview, SessionService, SessionServiceError};
