use std::sync::Arc;

use tracing::{debug, info};

use credit_core::model::{
    AnswerStore, DetailedGuidance, EligibilityResult, Question, QuestionId, SessionId, StepProgress,
};

use crate::api::{AnswerSubmission, AssessmentApi, AssessmentState};
use crate::error::StepError;

/// What the user should see after a step.
#[derive(Clone, Debug, PartialEq)]
pub enum StepOutcome {
    Question {
        question: Question,
        progress: StepProgress,
    },
    Complete {
        result: Option<EligibilityResult>,
    },
}

/// Paginated assessment: one question at a time, server decides the order.
pub struct StepController {
    api: Arc<dyn AssessmentApi>,
    session_id: SessionId,
    current: Option<Question>,
    progress: StepProgress,
    answers: AnswerStore,
    result: Option<EligibilityResult>,
    is_complete: bool,
}

impl StepController {
    #[must_use]
    pub fn new(api: Arc<dyn AssessmentApi>, session_id: SessionId) -> Self {
        Self {
            api,
            session_id,
            current: None,
            progress: StepProgress::default(),
            answers: AnswerStore::new(),
            result: None,
            is_complete: false,
        }
    }

    #[must_use]
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.current.as_ref()
    }

    /// Answer-store key of the active question.
    #[must_use]
    pub fn current_key(&self) -> Option<QuestionId> {
        let index = usize::try_from(self.progress.index()).unwrap_or_default();
        self.current.as_ref().map(|question| question.key(index))
    }

    #[must_use]
    pub fn progress(&self) -> StepProgress {
        self.progress
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    #[must_use]
    pub fn eligibility_result(&self) -> Option<&EligibilityResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    /// Record the in-progress answer for the active question.
    pub fn set_answer(&mut self, value: impl Into<String>) {
        if let Some(key) = self.current_key() {
            self.answers.set(key, value);
        }
    }

    /// Request the first question for this session.
    ///
    /// # Errors
    ///
    /// Returns `StepError::Api` if the backend call fails.
    pub async fn start(&mut self) -> Result<StepOutcome, StepError> {
        let state = self.api.start_assessment(&self.session_id).await?;
        info!(session_id = %self.session_id, "assessment started");
        self.answers = AnswerStore::new();
        self.result = None;
        self.is_complete = false;
        self.progress = StepProgress::new(0, 0, state.progress);
        Ok(self.adopt(state, "/assess-eligibility"))
    }

    /// Submit the answer held in the answer store for the active question.
    ///
    /// # Errors
    ///
    /// See [`StepController::submit_answer`].
    pub async fn submit_current(&mut self) -> Result<StepOutcome, StepError> {
        let text = self
            .current_key()
            .and_then(|key| self.answers.get(&key).map(str::to_owned))
            .unwrap_or_default();
        self.submit_answer(&text).await
    }

    /// Post an answer to the active question.
    ///
    /// Blank answers are rejected before any request is made. When the
    /// assessment continues, the position is re-read from the server.
    ///
    /// # Errors
    ///
    /// Returns `StepError::EmptyAnswer` for whitespace-only text,
    /// `StepError::NoActiveQuestion` before `start`, or `StepError::Api`.
    pub async fn submit_answer(&mut self, text: &str) -> Result<StepOutcome, StepError> {
        let answer = text.trim();
        if answer.is_empty() {
            return Err(StepError::EmptyAnswer);
        }
        let question_id = self.current_key().ok_or(StepError::NoActiveQuestion)?;

        let submission = AnswerSubmission {
            session_id: self.session_id.clone(),
            question_id: question_id.clone(),
            answer: answer.to_owned(),
        };
        debug!(session_id = %self.session_id, %question_id, "submitting answer");
        let state = self.api.submit_answer(&submission).await?;
        self.answers.set(question_id, answer);

        if !state.is_complete {
            let report = self.api.assessment_progress(&self.session_id).await?;
            self.progress = StepProgress::new(
                report.current_question_index,
                report.total_questions,
                report.progress,
            );
        }
        Ok(self.adopt(state, "/submit-answer"))
    }

    /// Fetch narrative guidance for a finished assessment.
    ///
    /// # Errors
    ///
    /// Returns `StepError::NotComplete` before the last answer, or
    /// `StepError::Api`.
    pub async fn detailed_guidance(&self) -> Result<DetailedGuidance, StepError> {
        if !self.is_complete {
            return Err(StepError::NotComplete);
        }
        Ok(self.api.detailed_guidance(&self.session_id).await?)
    }

    fn adopt(&mut self, state: AssessmentState, endpoint: &'static str) -> StepOutcome {
        match state.current_question {
            Some(question) if !state.is_complete => {
                self.current = Some(question.clone());
                StepOutcome::Question {
                    question,
                    progress: self.progress,
                }
            }
            _ => {
                if !state.is_complete {
                    debug!(endpoint, "response has no current question, treating as complete");
                }
                self.finish(state.eligibility_result)
            }
        }
    }

    fn finish(&mut self, result: Option<EligibilityResult>) -> StepOutcome {
        info!(session_id = %self.session_id, "assessment complete");
        self.current = None;
        self.is_complete = true;
        self.progress = StepProgress::complete(self.progress.total());
        self.result.clone_from(&result);
        StepOutcome::Complete { result }
    }
}
