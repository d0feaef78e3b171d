use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use credit_core::model::{AnswerStore, Question, QuestionId, SavedProgress, SessionId};

use crate::api::{AssessmentApi, EnhancedAssessment, EnhancedAssessmentRequest};
use crate::error::QuestionnaireError;
use crate::progress_service::ProgressService;

/// Label used for questions without a category.
pub const GENERAL_CATEGORY: &str = "General";

/// A run of consecutive questions sharing a category.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryGroup<'a> {
    pub label: &'a str,
    pub key: Option<&'a str>,
    /// `(position, question)` pairs; the position is also the fallback id.
    pub questions: Vec<(usize, &'a Question)>,
}

/// The all-questions-on-one-page assessment.
pub struct EnhancedQuestionnaire {
    api: Arc<dyn AssessmentApi>,
    progress: ProgressService,
    session_id: SessionId,
    questions: Vec<Question>,
    answers: AnswerStore,
    result: Option<EnhancedAssessment>,
}

impl EnhancedQuestionnaire {
    #[must_use]
    pub fn new(
        api: Arc<dyn AssessmentApi>,
        progress: ProgressService,
        session_id: SessionId,
    ) -> Self {
        Self {
            api,
            progress,
            session_id,
            questions: Vec::new(),
            answers: AnswerStore::new(),
            result: None,
        }
    }

    #[must_use]
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    #[must_use]
    pub fn result(&self) -> Option<&EnhancedAssessment> {
        self.result.as_ref()
    }

    /// Fetch the generated question base.
    ///
    /// Answers already entered (or resumed) are kept.
    ///
    /// # Errors
    ///
    /// Returns `QuestionnaireError::NoQuestions` when the base is empty, or
    /// `QuestionnaireError::Api`.
    pub async fn load(&mut self) -> Result<usize, QuestionnaireError> {
        let set = self.api.enhanced_questions().await?;
        if set.questions.is_empty() {
            return Err(QuestionnaireError::NoQuestions);
        }
        debug!(
            questions = set.questions.len(),
            categories = set.categories,
            "loaded question base"
        );
        self.questions = set.questions;
        self.result = None;
        Ok(self.questions.len())
    }

    /// Answer-store key of the question at `index`.
    ///
    /// Answers are keyed by position since generated question bases may
    /// repeat ids across categories.
    ///
    /// # Errors
    ///
    /// Returns `QuestionnaireError::UnknownQuestion` for an out-of-range index.
    pub fn key_for(&self, index: usize) -> Result<QuestionId, QuestionnaireError> {
        if index < self.questions.len() {
            Ok(QuestionId::from_index(index))
        } else {
            Err(QuestionnaireError::UnknownQuestion { index })
        }
    }

    /// # Errors
    ///
    /// Returns `QuestionnaireError::UnknownQuestion` for an out-of-range index.
    pub fn set_answer(
        &mut self,
        index: usize,
        value: impl Into<String>,
    ) -> Result<(), QuestionnaireError> {
        let key = self.key_for(index)?;
        self.answers.set(key, value);
        Ok(())
    }

    #[must_use]
    pub fn answer(&self, index: usize) -> Option<&str> {
        self.key_for(index)
            .ok()
            .and_then(|key| self.answers.get(&key))
    }

    /// Questions grouped into consecutive runs of the same category label.
    #[must_use]
    pub fn groups(&self) -> Vec<CategoryGroup<'_>> {
        let mut groups: Vec<CategoryGroup<'_>> = Vec::new();
        for (index, question) in self.questions.iter().enumerate() {
            let label = question.category().unwrap_or(GENERAL_CATEGORY);
            match groups.last_mut() {
                Some(group) if group.label == label => group.questions.push((index, question)),
                _ => groups.push(CategoryGroup {
                    label,
                    key: question.category_key(),
                    questions: vec![(index, question)],
                }),
            }
        }
        groups
    }

    /// Post every non-blank answer for a full assessment.
    ///
    /// # Errors
    ///
    /// Returns `QuestionnaireError::NoAnswers` without a request when nothing
    /// was answered, or `QuestionnaireError::Api`.
    pub async fn submit(&mut self) -> Result<&EnhancedAssessment, QuestionnaireError> {
        let answers = self.answers.collect(&self.questions);
        if answers.is_empty() {
            return Err(QuestionnaireError::NoAnswers);
        }
        let request = EnhancedAssessmentRequest {
            session_id: self.session_id.clone(),
            answers,
        };
        let assessment = self.api.complete_enhanced_assessment(&request).await?;
        info!(
            session_id = %self.session_id,
            answered = request.answers.len(),
            "enhanced assessment completed"
        );
        Ok(self.result.insert(assessment))
    }

    /// # Errors
    ///
    /// Returns `QuestionnaireError::Progress` if persistence fails.
    pub async fn save(&self) -> Result<SavedProgress, QuestionnaireError> {
        Ok(self.progress.save(&self.session_id, &self.answers).await?)
    }

    /// Restore the saved session and answers, if a save exists.
    ///
    /// # Errors
    ///
    /// Returns `QuestionnaireError::Progress` if the save cannot be read.
    pub async fn resume(&mut self) -> Result<Option<SavedProgress>, QuestionnaireError> {
        let saved = self.progress.load().await?;
        if let Some(saved) = &saved {
            self.session_id = saved.session_id.clone();
            self.answers = saved.answers.clone();
            info!(session_id = %self.session_id, "progress resumed");
        }
        Ok(saved)
    }

    /// Forget all answers, the loaded questions and the saved progress.
    ///
    /// # Errors
    ///
    /// Returns `QuestionnaireError::Progress` if the save cannot be removed.
    pub async fn reset(&mut self) -> Result<(), QuestionnaireError> {
        self.answers = AnswerStore::new();
        self.questions.clear();
        self.result = None;
        self.progress.clear().await?;
        Ok(())
    }

    /// Markdown document of the completed assessment and the answers behind it.
    #[must_use]
    pub fn report_markdown(&self) -> Option<String> {
        let result = self.result.as_ref()?;
        let mut doc = String::from("# 45Q Eligibility Assessment\n\n");
        let _ = writeln!(doc, "- Session: {}", result.session_id);
        let _ = writeln!(doc, "- Questions answered: {}", result.questions_answered);
        if let Some(timestamp) = &result.timestamp {
            let _ = writeln!(doc, "- Generated: {timestamp}");
        }
        let _ = write!(doc, "\n{}\n\n## Answers\n\n", result.assessment.trim());
        for answer in self.answers.collect(&self.questions) {
            let _ = writeln!(doc, "- **{}** {}", answer.question, answer.answer);
        }
        Some(doc)
    }

    /// Write [`EnhancedQuestionnaire::report_markdown`] to `path`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionnaireError::NotCompleted` before a successful submit,
    /// or `QuestionnaireError::Export` if the file cannot be written.
    pub async fn export(&self, path: &Path) -> Result<(), QuestionnaireError> {
        let doc = self
            .report_markdown()
            .ok_or(QuestionnaireError::NotCompleted)?;
        tokio::fs::write(path, doc)
            .await
            .map_err(|source| QuestionnaireError::Export {
                path: path.to_path_buf(),
                source,
            })?;
        info!(path = %path.display(), "assessment exported");
        Ok(())
    }
}
