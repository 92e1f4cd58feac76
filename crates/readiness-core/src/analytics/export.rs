use std::io::Write;

use chrono::SecondsFormat;

use crate::readiness::Dimension;
use crate::sessions::SessionRecord;

const SESSION_FIXED_HEADERS: [&str; 7] = [
    "session_id",
    "participant_id",
    "session_type",
    "occurred_at",
    "scoring_model",
    "readiness_index",
    "readiness_category",
];

const BARRIER_HEADERS: [&str; 11] = [
    "barrier_row_id",
    "session_id",
    "participant_id",
    "barrier_code",
    "barrier_label",
    "barrier_category",
    "dimension_key",
    "severity",
    "source",
    "status",
    "notes",
];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush CSV output: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV output is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

fn newest_first(sessions: &[SessionRecord]) -> Vec<&SessionRecord> {
    let mut ordered: Vec<_> = sessions.iter().collect();
    ordered.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.session_id.cmp(&a.session_id))
    });
    ordered
}

/// One row per session with the per-dimension averages the index was derived from.
pub fn write_sessions_csv<W: Write>(
    sessions: &[SessionRecord],
    writer: W,
) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut headers: Vec<String> = SESSION_FIXED_HEADERS
        .iter()
        .map(|header| header.to_string())
        .collect();
    headers.extend(
        Dimension::ordered()
            .into_iter()
            .map(|dimension| format!("score_{}", dimension.key())),
    );
    csv_writer.write_record(&headers)?;

    for session in newest_first(sessions) {
        let mut row = vec![
            session.session_id.0.clone(),
            session.participant_id.0.clone(),
            session.session_type.label().to_string(),
            session
                .created_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            session.model().key().to_string(),
            session.readiness_index().to_string(),
            session.readiness_category().code().to_string(),
        ];
        row.extend(
            session
                .assessment
                .dimension_averages
                .iter()
                .map(|(_, average)| average.to_string()),
        );
        csv_writer.write_record(&row)?;
    }

    csv_writer.flush()?;
    Ok(())
}

pub fn write_barriers_csv<W: Write>(
    sessions: &[SessionRecord],
    writer: W,
) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(BARRIER_HEADERS)?;

    for session in newest_first(sessions) {
        for (ordinal, barrier) in session.barriers.records().iter().enumerate() {
            csv_writer.write_record([
                format!("{}-{:02}", session.session_id.0, ordinal + 1).as_str(),
                session.session_id.0.as_str(),
                session.participant_id.0.as_str(),
                barrier.code.as_str(),
                barrier.label.as_str(),
                barrier.category.as_str(),
                barrier.dimension.map_or("", Dimension::key),
                barrier.severity.label(),
                barrier.source.label(),
                barrier.status.label(),
                barrier.notes.as_deref().unwrap_or(""),
            ])?;
        }
    }

    csv_writer.flush()?;
    Ok(())
}

pub fn sessions_csv(sessions: &[SessionRecord]) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_sessions_csv(sessions, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

pub fn barriers_csv(sessions: &[SessionRecord]) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_barriers_csv(sessions, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}
