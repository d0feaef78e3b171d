use async_trait::async_trait;
use credit_core::model::SavedProgress;

use crate::repository::{ProgressRepository, StorageError};

use super::SqliteRepository;
use super::mapping::{answers_to_json, map_progress_row};

#[async_trait]
impl ProgressRepository for SqliteRepository {
    async fn save_progress(&self, progress: &SavedProgress) -> Result<(), StorageError> {
        let answers = answers_to_json(&progress.answers)?;
        sqlx::query(
            r"
            INSERT INTO saved_progress (id, session_id, answers, saved_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(id) DO UPDATE SET
                session_id = excluded.session_id,
                answers = excluded.answers,
                saved_at = excluded.saved_at
            ",
        )
        .bind(1_i64)
        .bind(progress.session_id.as_str())
        .bind(answers)
        .bind(progress.saved_at)
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        tracing::debug!(
            session_id = %progress.session_id,
            answers = progress.answers.len(),
            "saved progress"
        );
        Ok(())
    }

    async fn load_progress(&self) -> Result<Option<SavedProgress>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT session_id, answers, saved_at
            FROM saved_progress
            WHERE id = 1
            ",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        row.as_ref().map(map_progress_row).transpose()
    }

    async fn clear_progress(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM saved_progress WHERE id = 1")
            .execute(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;
        Ok(())
    }
}
