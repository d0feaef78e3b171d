use chrono::{DateTime, Utc};
use credit_core::model::{AnswerStore, SavedProgress, SessionId};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn answers_to_json(answers: &AnswerStore) -> Result<String, StorageError> {
    serde_json::to_string(answers).map_err(ser)
}

pub(crate) fn answers_from_json(raw: &str) -> Result<AnswerStore, StorageError> {
    serde_json::from_str(raw).map_err(ser)
}

pub(crate) fn map_progress_row(row: &SqliteRow) -> Result<SavedProgress, StorageError> {
    let session_id: String = row.try_get("session_id").map_err(ser)?;
    let answers: String = row.try_get("answers").map_err(ser)?;
    let saved_at: DateTime<Utc> = row.try_get("saved_at").map_err(ser)?;

    Ok(SavedProgress {
        session_id: SessionId::new(session_id).map_err(ser)?,
        answers: answers_from_json(&answers)?,
        saved_at,
    })
}
