use std::sync::Arc;

use tracing::info;

use credit_core::model::{AnswerStore, SavedProgress, SessionId};
use storage::repository::ProgressRepository;

use crate::Clock;
use crate::error::ProgressError;

/// Saves and restores questionnaire answers between runs.
#[derive(Clone)]
pub struct ProgressService {
    clock: Clock,
    repo: Arc<dyn ProgressRepository>,
}

impl ProgressService {
    #[must_use]
    pub fn new(clock: Clock, repo: Arc<dyn ProgressRepository>) -> Self {
        Self { clock, repo }
    }

    /// Persist the answers under `session_id`, replacing any earlier save.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if persistence fails.
    pub async fn save(
        &self,
        session_id: &SessionId,
        answers: &AnswerStore,
    ) -> Result<SavedProgress, ProgressError> {
        let progress = SavedProgress {
            session_id: session_id.clone(),
            answers: answers.clone(),
            saved_at: self.clock.now(),
        };
        self.repo.save_progress(&progress).await?;
        info!(%session_id, answers = answers.answered_count(), "progress saved");
        Ok(progress)
    }

    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the record cannot be read.
    pub async fn load(&self) -> Result<Option<SavedProgress>, ProgressError> {
        Ok(self.repo.load_progress().await?)
    }

    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the record cannot be removed.
    pub async fn clear(&self) -> Result<(), ProgressError> {
        self.repo.clear_progress().await?;
        info!("saved progress cleared");
        Ok(())
    }
}
