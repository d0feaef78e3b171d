use std::sync::Arc;

use tracing::{debug, info, warn};

use credit_core::completion::{CompletionPolicy, LexicalCompletionPolicy, TurnContext, TurnVerdict};
use credit_core::model::{ChatTurn, Transcript};

use crate::api::{AssessmentApi, QuestionRequest};
use crate::error::{ApiError, ChatError};
use crate::prompts::{
    FALLBACK_ASSESSMENT_PROMPT, FinalAssessmentKind, OPENING_QUESTION, final_assessment_prompt,
    next_turn_prompt,
};

/// One line of the displayed conversation.
///
/// Errors are shown inline but never become part of the model-facing
/// transcript.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatEntry {
    Turn(ChatTurn),
    Error(String),
}

/// Outcome of one user message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatReply {
    pub reply: String,
    pub verdict: TurnVerdict,
    /// Present when this turn triggered the one-shot final report.
    pub final_assessment: Option<String>,
}

/// Drives the conversational interview against `/ask-question`.
pub struct ChatController {
    api: Arc<dyn AssessmentApi>,
    policy: Arc<dyn CompletionPolicy>,
    prompt_template: String,
    transcript: Transcript,
    entries: Vec<ChatEntry>,
    is_complete: bool,
}

impl ChatController {
    /// Start an interview, fetching the prompt template from the backend and
    /// falling back to the built-in one when that fails.
    pub async fn start(api: Arc<dyn AssessmentApi>, policy: Arc<dyn CompletionPolicy>) -> Self {
        let template = match api.assessment_prompt().await {
            Ok(prompt) if !prompt.trim().is_empty() => prompt,
            Ok(_) => {
                warn!("assessment prompt is empty, using built-in prompt");
                FALLBACK_ASSESSMENT_PROMPT.to_owned()
            }
            Err(err) => {
                warn!(error = %err, "could not load assessment prompt, using built-in prompt");
                FALLBACK_ASSESSMENT_PROMPT.to_owned()
            }
        };
        Self::with_template(api, policy, template)
    }

    #[must_use]
    pub fn with_template(
        api: Arc<dyn AssessmentApi>,
        policy: Arc<dyn CompletionPolicy>,
        prompt_template: impl Into<String>,
    ) -> Self {
        let opening = ChatTurn::assistant(OPENING_QUESTION);
        let mut transcript = Transcript::new();
        transcript.push(opening.clone());
        info!("interview started");
        Self {
            api,
            policy,
            prompt_template: prompt_template.into(),
            transcript,
            entries: vec![ChatEntry::Turn(opening)],
            is_complete: false,
        }
    }

    /// Convenience constructor using the lexical completion policy.
    pub async fn start_default(api: Arc<dyn AssessmentApi>) -> Self {
        Self::start(api, Arc::new(LexicalCompletionPolicy::default())).await
    }

    #[must_use]
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    #[must_use]
    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    #[must_use]
    pub fn prompt_template(&self) -> &str {
        &self.prompt_template
    }

    /// Send a user message and fetch the next assistant turn.
    ///
    /// When the completion policy says the interview is over and no final
    /// report has been produced yet, exactly one final-report request follows.
    ///
    /// # Errors
    ///
    /// Returns `ChatError::EmptyMessage` for blank input without touching the
    /// transcript, or `ChatError::Api` when a request fails. Failed requests
    /// are also recorded as an inline error entry.
    pub async fn send(&mut self, message: &str) -> Result<ChatReply, ChatError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        self.push_turn(ChatTurn::user(message));

        let prompt = next_turn_prompt(&self.prompt_template, &self.transcript);
        let reply = self.ask(prompt).await?;
        self.push_turn(ChatTurn::assistant(reply.clone()));

        let verdict = self.policy.classify(TurnContext {
            transcript_len: self.transcript.len(),
            text: &reply,
        });
        debug!(?verdict, transcript_len = self.transcript.len(), "classified assistant turn");

        let final_assessment = if verdict == TurnVerdict::ForceFinal && !self.is_complete {
            self.is_complete = true;
            info!("forcing final assessment");
            Some(self.final_assessment(FinalAssessmentKind::Forced).await?)
        } else {
            None
        };

        Ok(ChatReply {
            reply,
            verdict,
            final_assessment,
        })
    }

    /// Ask for the final report now, regardless of the completion policy.
    ///
    /// Every call issues a request, even after a report was produced.
    ///
    /// # Errors
    ///
    /// Returns `ChatError::Api` when the request fails.
    pub async fn request_complete_assessment(&mut self) -> Result<String, ChatError> {
        info!("final assessment requested manually");
        let report = self.final_assessment(FinalAssessmentKind::Manual).await?;
        self.is_complete = true;
        Ok(report)
    }

    async fn final_assessment(&mut self, kind: FinalAssessmentKind) -> Result<String, ChatError> {
        let prompt = final_assessment_prompt(kind, &self.transcript);
        let report = self.ask(prompt).await?;
        self.push_turn(ChatTurn::assistant(report.clone()));
        Ok(report)
    }

    async fn ask(&mut self, prompt: String) -> Result<String, ChatError> {
        match self.api.ask_question(&QuestionRequest::new(prompt)).await {
            Ok(answer) => Ok(answer.answer),
            Err(err) => {
                self.record_error(&err);
                Err(err.into())
            }
        }
    }

    fn push_turn(&mut self, turn: ChatTurn) {
        self.transcript.push(turn.clone());
        self.entries.push(ChatEntry::Turn(turn));
    }

    fn record_error(&mut self, err: &ApiError) {
        warn!(error = %err, "interview request failed");
        self.entries
            .push(ChatEntry::Error(format!("Sorry, something went wrong: {err}")));
    }
}
