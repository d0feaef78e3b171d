//! Request and response bodies of the assessment backend, plus envelope
//! decoding.
//!
//! Every endpoint answers in exactly one shape. Wrapped endpoints return
//! `{success, message, data, error}` and the payload lives in `data`; bare
//! endpoints return the payload at the top level. Decoding never guesses
//! between the two.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use credit_core::model::{CollectedAnswer, EligibilityResult, Question, QuestionId, SessionId};

use crate::error::ApiError;

// ─── Requests ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Serialize)]
pub struct StartAssessmentRequest<'a> {
    pub session_id: &'a SessionId,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AnswerSubmission {
    pub session_id: SessionId,
    pub question_id: QuestionId,
    pub answer: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EnhancedAssessmentRequest {
    pub session_id: SessionId,
    pub answers: Vec<CollectedAnswer>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuestionRequest {
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl QuestionRequest {
    #[must_use]
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            context: None,
        }
    }

    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

/// One file of a multipart document upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

// ─── Responses ─────────────────────────────────────────────────────────────

/// State of the paginated assessment after starting or answering.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AssessmentState {
    pub session_id: String,
    #[serde(default)]
    pub current_question: Option<Question>,
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub is_complete: bool,
    #[serde(default)]
    pub eligibility_result: Option<EligibilityResult>,
}

/// Server-side position of a paginated assessment.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ProgressReport {
    pub session_id: String,
    pub current_question_index: u32,
    pub total_questions: u32,
    pub progress: f64,
    #[serde(default)]
    pub is_complete: bool,
    #[serde(default)]
    pub answers_provided: u32,
}

/// The generated question base, flattened across categories.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct EnhancedQuestionSet {
    pub questions: Vec<Question>,
    #[serde(default)]
    pub total_questions: u32,
    #[serde(default)]
    pub categories: u32,
}

/// Report produced from a full set of questionnaire answers.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct EnhancedAssessment {
    pub assessment: String,
    pub session_id: String,
    #[serde(default)]
    pub questions_answered: u32,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PromptPayload {
    pub prompt: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RegenerateOutput {
    #[serde(default)]
    pub output: String,
}

// ─── Decoding ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RawEnvelope {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

fn envelope_error(endpoint: &'static str, reason: impl Into<String>) -> ApiError {
    ApiError::Envelope {
        endpoint,
        reason: reason.into(),
    }
}

fn parse_json(endpoint: &'static str, body: &str) -> Result<Value, ApiError> {
    serde_json::from_str(body).map_err(|err| envelope_error(endpoint, format!("invalid JSON: {err}")))
}

/// Picks the most specific failure text a response carries.
fn failure_message(error: Option<&str>, data: Option<&Value>, message: Option<&str>) -> String {
    let data_error = data
        .and_then(|value| value.get("error"))
        .and_then(Value::as_str);
    [error, data_error, message]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|text| !text.is_empty())
        .unwrap_or("request was not successful")
        .to_owned()
}

/// Decode a `{success, message, data, error}` response and return its `data`.
///
/// # Errors
///
/// Returns `ApiError::Envelope` when the body is not a wrapped response or the
/// payload does not match `T`, and `ApiError::Rejected` when `success` is false.
pub fn decode_wrapped<T: DeserializeOwned>(endpoint: &'static str, body: &str) -> Result<T, ApiError> {
    let value = parse_json(endpoint, body)?;
    let envelope: RawEnvelope = serde_json::from_value(value)
        .map_err(|err| envelope_error(endpoint, format!("expected a wrapped response: {err}")))?;

    if !envelope.success {
        return Err(ApiError::Rejected {
            endpoint,
            message: failure_message(
                envelope.error.as_deref(),
                envelope.data.as_ref(),
                envelope.message.as_deref(),
            ),
        });
    }

    let data = envelope
        .data
        .ok_or_else(|| envelope_error(endpoint, "wrapped response has no data"))?;
    serde_json::from_value(data).map_err(|err| envelope_error(endpoint, err.to_string()))
}

/// Decode a response whose payload is the top-level object.
///
/// # Errors
///
/// Returns `ApiError::Rejected` when the body carries `success: false`, and
/// `ApiError::Envelope` when it does not match `T`.
pub fn decode_bare<T: DeserializeOwned>(endpoint: &'static str, body: &str) -> Result<T, ApiError> {
    let value = parse_json(endpoint, body)?;
    if value.get("success").and_then(Value::as_bool) == Some(false) {
        let text = |key: &str| value.get(key).and_then(Value::as_str);
        return Err(ApiError::Rejected {
            endpoint,
            message: failure_message(text("error"), value.get("data"), text("message")),
        });
    }
    serde_json::from_value(value).map_err(|err| envelope_error(endpoint, err.to_string()))
}

/// Extract a human-readable reason from a non-success response body.
#[must_use]
pub fn error_detail(body: &str) -> String {
    const MAX_RAW: usize = 300;

    if let Ok(value) = serde_json::from_str::<Value>(body) {
        match value.get("detail") {
            Some(Value::String(detail)) => return detail.clone(),
            Some(detail @ (Value::Array(_) | Value::Object(_))) => return detail.to_string(),
            _ => {}
        }
        let text = |key: &str| value.get(key).and_then(Value::as_str);
        if text("error").is_some() || text("message").is_some() {
            return failure_message(text("error"), None, text("message"));
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "no details provided".to_owned();
    }
    let mut raw: String = trimmed.chars().take(MAX_RAW).collect();
    if trimmed.chars().count() > MAX_RAW {
        raw.push_str("...");
    }
    raw
}
