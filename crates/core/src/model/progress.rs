use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{AnswerStore, SessionId};

/// Position within the paginated assessment as reported by the backend.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StepProgress {
    index: u32,
    total: u32,
    fraction: f64,
}

impl StepProgress {
    /// `fraction` is clamped into `[0, 1]`; non-finite values become 0.
    #[must_use]
    pub fn new(index: u32, total: u32, fraction: f64) -> Self {
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            index,
            total,
            fraction,
        }
    }

    #[must_use]
    pub fn complete(total: u32) -> Self {
        Self::new(total, total, 1.0)
    }

    /// Zero-based index of the current question.
    #[must_use]
    pub fn index(&self) -> u32 {
        self.index
    }

    /// One-based question number for display.
    #[must_use]
    pub fn number(&self) -> u32 {
        self.index.saturating_add(1)
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    /// Width of the progress indicator in percent.
    #[must_use]
    pub fn width_percent(&self) -> f64 {
        self.fraction * 100.0
    }
}

/// Resumable questionnaire state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedProgress {
    pub session_id: SessionId,
    pub answers: AnswerStore,
    pub saved_at: DateTime<Utc>,
}
