//! Typed access to the 45Q assessment backend.

mod config;
mod http;
pub mod wire;

use async_trait::async_trait;

use credit_core::model::{
    DetailedGuidance, ForecastRequest, ForecastResponse, HealthStatus, QueryAnswer, SessionId,
    UploadSummary, VectorStoreStats,
};

use crate::error::ApiError;

pub use config::{ApiConfig, DEFAULT_TIMEOUT, parse_timeout_secs};
pub use http::HttpAssessmentApi;
pub use wire::{
    AnswerSubmission, AssessmentState, EnhancedAssessment, EnhancedAssessmentRequest,
    EnhancedQuestionSet, ProgressReport, QuestionRequest, UploadFile,
};

/// The backend HTTP surface, one method per endpoint.
///
/// Controllers only talk to the backend through this trait so they can be
/// driven by an in-memory fake.
#[async_trait]
pub trait AssessmentApi: Send + Sync {
    /// `GET /get-enhanced-questions`
    async fn enhanced_questions(&self) -> Result<EnhancedQuestionSet, ApiError>;

    /// `POST /assess-eligibility`
    async fn start_assessment(&self, session_id: &SessionId) -> Result<AssessmentState, ApiError>;

    /// `POST /submit-answer`
    async fn submit_answer(&self, submission: &AnswerSubmission)
    -> Result<AssessmentState, ApiError>;

    /// `GET /assessment-progress/{session_id}`
    async fn assessment_progress(&self, session_id: &SessionId)
    -> Result<ProgressReport, ApiError>;

    /// `POST /complete-enhanced-assessment`
    async fn complete_enhanced_assessment(
        &self,
        request: &EnhancedAssessmentRequest,
    ) -> Result<EnhancedAssessment, ApiError>;

    /// `POST /detailed-guidance/{session_id}`
    async fn detailed_guidance(&self, session_id: &SessionId)
    -> Result<DetailedGuidance, ApiError>;

    /// `POST /forecast-credits`
    async fn forecast_credits(&self, request: &ForecastRequest)
    -> Result<ForecastResponse, ApiError>;

    /// `POST /ask-question`
    async fn ask_question(&self, request: &QuestionRequest) -> Result<QueryAnswer, ApiError>;

    /// `POST /upload-documents`, multipart field `files`.
    async fn upload_documents(&self, files: Vec<UploadFile>) -> Result<UploadSummary, ApiError>;

    /// `GET /vector-store-stats`
    async fn vector_store_stats(&self) -> Result<VectorStoreStats, ApiError>;

    /// `GET /assessment-prompt`, returning the prompt text.
    async fn assessment_prompt(&self) -> Result<String, ApiError>;

    /// `POST /regenerate-question-base`, returning the generator output.
    async fn regenerate_question_base(&self) -> Result<String, ApiError>;

    /// `GET /health`
    async fn health(&self) -> Result<HealthStatus, ApiError>;
}
