use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

use credit_core::model::{
    ApiBaseUrl, DetailedGuidance, ForecastRequest, ForecastResponse, HealthStatus, QueryAnswer,
    SessionId, UploadSummary, VectorStoreStats,
};

use super::AssessmentApi;
use super::config::ApiConfig;
use super::wire::{
    self, AnswerSubmission, AssessmentState, EnhancedAssessment, EnhancedAssessmentRequest,
    EnhancedQuestionSet, ProgressReport, PromptPayload, QuestionRequest, RegenerateOutput,
    StartAssessmentRequest, UploadFile,
};
use crate::error::ApiError;

#[derive(Clone, Copy)]
enum Shape {
    Bare,
    Wrapped,
}

/// `reqwest`-backed implementation of [`AssessmentApi`].
#[derive(Clone)]
pub struct HttpAssessmentApi {
    client: Client,
    base_url: ApiBaseUrl,
}

impl HttpAssessmentApi {
    /// Build a client with the configured request timeout.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Client` if the TLS backend cannot be initialised.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ApiError::Client)?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &ApiBaseUrl {
        &self.base_url
    }

    fn get(&self, segments: &[&str]) -> RequestBuilder {
        self.client.get(self.base_url.endpoint(segments))
    }

    fn post(&self, segments: &[&str]) -> RequestBuilder {
        self.client.post(self.base_url.endpoint(segments))
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        shape: Shape,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        debug!(endpoint, "sending request");
        let transport = |source| ApiError::Transport { endpoint, source };

        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        let body = response.text().await.map_err(transport)?;

        if !status.is_success() {
            let detail = wire::error_detail(&body);
            debug!(endpoint, status = status.as_u16(), %detail, "request failed");
            return Err(ApiError::Server {
                endpoint,
                status: status.as_u16(),
                detail,
            });
        }

        match shape {
            Shape::Bare => wire::decode_bare(endpoint, &body),
            Shape::Wrapped => wire::decode_wrapped(endpoint, &body),
        }
    }
}

#[async_trait]
impl AssessmentApi for HttpAssessmentApi {
    async fn enhanced_questions(&self) -> Result<EnhancedQuestionSet, ApiError> {
        let request = self.get(&["get-enhanced-questions"]);
        self.execute("/get-enhanced-questions", Shape::Wrapped, request)
            .await
    }

    async fn start_assessment(&self, session_id: &SessionId) -> Result<AssessmentState, ApiError> {
        let request = self
            .post(&["assess-eligibility"])
            .json(&StartAssessmentRequest { session_id });
        self.execute("/assess-eligibility", Shape::Bare, request).await
    }

    async fn submit_answer(
        &self,
        submission: &AnswerSubmission,
    ) -> Result<AssessmentState, ApiError> {
        let request = self.post(&["submit-answer"]).json(submission);
        self.execute("/submit-answer", Shape::Bare, request).await
    }

    async fn assessment_progress(
        &self,
        session_id: &SessionId,
    ) -> Result<ProgressReport, ApiError> {
        let request = self.get(&["assessment-progress", session_id.as_str()]);
        self.execute("/assessment-progress", Shape::Wrapped, request)
            .await
    }

    async fn complete_enhanced_assessment(
        &self,
        request: &EnhancedAssessmentRequest,
    ) -> Result<EnhancedAssessment, ApiError> {
        let request = self.post(&["complete-enhanced-assessment"]).json(request);
        self.execute("/complete-enhanced-assessment", Shape::Wrapped, request)
            .await
    }

    async fn detailed_guidance(
        &self,
        session_id: &SessionId,
    ) -> Result<DetailedGuidance, ApiError> {
        let request = self.post(&["detailed-guidance", session_id.as_str()]);
        self.execute("/detailed-guidance", Shape::Wrapped, request)
            .await
    }

    async fn forecast_credits(
        &self,
        request: &ForecastRequest,
    ) -> Result<ForecastResponse, ApiError> {
        let request = self.post(&["forecast-credits"]).json(request);
        self.execute("/forecast-credits", Shape::Bare, request).await
    }

    async fn ask_question(&self, request: &QuestionRequest) -> Result<QueryAnswer, ApiError> {
        let request = self.post(&["ask-question"]).json(request);
        self.execute("/ask-question", Shape::Bare, request).await
    }

    async fn upload_documents(&self, files: Vec<UploadFile>) -> Result<UploadSummary, ApiError> {
        let form = files.into_iter().fold(Form::new(), |form, file| {
            form.part("files", Part::bytes(file.bytes).file_name(file.file_name))
        });
        let request = self.post(&["upload-documents"]).multipart(form);
        self.execute("/upload-documents", Shape::Bare, request).await
    }

    async fn vector_store_stats(&self) -> Result<VectorStoreStats, ApiError> {
        let request = self.get(&["vector-store-stats"]);
        self.execute("/vector-store-stats", Shape::Wrapped, request)
            .await
    }

    async fn assessment_prompt(&self) -> Result<String, ApiError> {
        let request = self.get(&["assessment-prompt"]);
        let payload: PromptPayload = self
            .execute("/assessment-prompt", Shape::Wrapped, request)
            .await?;
        Ok(payload.prompt)
    }

    async fn regenerate_question_base(&self) -> Result<String, ApiError> {
        let request = self.post(&["regenerate-question-base"]);
        let payload: RegenerateOutput = self
            .execute("/regenerate-question-base", Shape::Wrapped, request)
            .await?;
        Ok(payload.output)
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        let request = self.get(&["health"]);
        self.execute("/health", Shape::Bare, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpAssessmentApi>();
    }

    #[test]
    fn builds_with_default_config() {
        let api = HttpAssessmentApi::new(&ApiConfig::default()).unwrap();
        assert_eq!(
            api.base_url().endpoint(&["assessment-progress", "company 1"]).as_str(),
            "http://localhost:8000/assessment-progress/company%201"
        );
    }
}
