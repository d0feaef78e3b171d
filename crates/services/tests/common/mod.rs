#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use credit_core::model::{
    DetailedGuidance, ForecastRequest, ForecastResponse, HealthStatus, QueryAnswer, Question,
    SessionId, UploadSummary, VectorStoreStats,
};
use services::ApiError;
use services::api::{
    AnswerSubmission, AssessmentApi, AssessmentState, EnhancedAssessment,
    EnhancedAssessmentRequest, EnhancedQuestionSet, ProgressReport, QuestionRequest, UploadFile,
};

/// Scripted reply for `/ask-question`.
pub enum Reply {
    Answer(String),
    ServerError(u16, &'static str),
}

impl Reply {
    pub fn answer(text: &str) -> Self {
        Self::Answer(text.to_owned())
    }
}

/// In-memory backend that records every call.
#[derive(Default)]
pub struct FakeApi {
    calls: Mutex<Vec<&'static str>>,
    pub prompt: Mutex<Option<String>>,
    pub replies: Mutex<VecDeque<Reply>>,
    pub asked: Mutex<Vec<QuestionRequest>>,
    pub start_state: Mutex<Option<AssessmentState>>,
    pub submit_states: Mutex<VecDeque<AssessmentState>>,
    pub submissions: Mutex<Vec<AnswerSubmission>>,
    pub progress_reports: Mutex<VecDeque<ProgressReport>>,
    pub questions: Mutex<Vec<Question>>,
    pub enhanced_requests: Mutex<Vec<EnhancedAssessmentRequest>>,
    pub forecasts: Mutex<Vec<ForecastRequest>>,
    pub uploads: Mutex<Vec<Vec<UploadFile>>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_replies<I: IntoIterator<Item = Reply>>(replies: I) -> Self {
        let fake = Self::default();
        fake.replies.lock().unwrap().extend(replies);
        fake
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, endpoint: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| **call == endpoint)
            .count()
    }

    pub fn asked_questions(&self) -> Vec<String> {
        self.asked
            .lock()
            .unwrap()
            .iter()
            .map(|request| request.question.clone())
            .collect()
    }

    fn record(&self, endpoint: &'static str) {
        self.calls.lock().unwrap().push(endpoint);
    }

    fn missing(endpoint: &'static str) -> ApiError {
        ApiError::Server {
            endpoint,
            status: 404,
            detail: "not scripted".to_owned(),
        }
    }
}

pub fn question_state(question: Question, progress: f64) -> AssessmentState {
    AssessmentState {
        session_id: "company-1".to_owned(),
        current_question: Some(question),
        progress,
        is_complete: false,
        eligibility_result: None,
    }
}

pub fn complete_state() -> AssessmentState {
    AssessmentState {
        session_id: "company-1".to_owned(),
        current_question: None,
        progress: 1.0,
        is_complete: true,
        eligibility_result: None,
    }
}

pub fn progress_report(index: u32, total: u32) -> ProgressReport {
    ProgressReport {
        session_id: "company-1".to_owned(),
        current_question_index: index,
        total_questions: total,
        progress: f64::from(index) / f64::from(total),
        is_complete: false,
        answers_provided: index,
    }
}

#[async_trait]
impl AssessmentApi for FakeApi {
    async fn enhanced_questions(&self) -> Result<EnhancedQuestionSet, ApiError> {
        self.record("/get-enhanced-questions");
        let questions = self.questions.lock().unwrap().clone();
        Ok(EnhancedQuestionSet {
            total_questions: u32::try_from(questions.len()).unwrap(),
            categories: 1,
            questions,
        })
    }

    async fn start_assessment(&self, _session_id: &SessionId) -> Result<AssessmentState, ApiError> {
        self.record("/assess-eligibility");
        self.start_state
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| Self::missing("/assess-eligibility"))
    }

    async fn submit_answer(
        &self,
        submission: &AnswerSubmission,
    ) -> Result<AssessmentState, ApiError> {
        self.record("/submit-answer");
        self.submissions.lock().unwrap().push(submission.clone());
        self.submit_states
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Self::missing("/submit-answer"))
    }

    async fn assessment_progress(
        &self,
        _session_id: &SessionId,
    ) -> Result<ProgressReport, ApiError> {
        self.record("/assessment-progress");
        self.progress_reports
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Self::missing("/assessment-progress"))
    }

    async fn complete_enhanced_assessment(
        &self,
        request: &EnhancedAssessmentRequest,
    ) -> Result<EnhancedAssessment, ApiError> {
        self.record("/complete-enhanced-assessment");
        self.enhanced_requests.lock().unwrap().push(request.clone());
        Ok(EnhancedAssessment {
            assessment: "ELIGIBILITY: Yes".to_owned(),
            session_id: request.session_id.to_string(),
            questions_answered: u32::try_from(request.answers.len()).unwrap(),
            timestamp: Some("2024-01-01T00:00:00".to_owned()),
        })
    }

    async fn detailed_guidance(
        &self,
        _session_id: &SessionId,
    ) -> Result<DetailedGuidance, ApiError> {
        self.record("/detailed-guidance");
        Ok(DetailedGuidance::default())
    }

    async fn forecast_credits(
        &self,
        request: &ForecastRequest,
    ) -> Result<ForecastResponse, ApiError> {
        self.record("/forecast-credits");
        self.forecasts.lock().unwrap().push(request.clone());
        Ok(ForecastResponse {
            session_id: request.session_id.to_string(),
            forecast: None,
            confidence_score: 0.85,
            warnings: Vec::new(),
            next_steps: vec!["Review forecast assumptions".to_owned()],
        })
    }

    async fn ask_question(&self, request: &QuestionRequest) -> Result<QueryAnswer, ApiError> {
        self.record("/ask-question");
        self.asked.lock().unwrap().push(request.clone());
        match self.replies.lock().unwrap().pop_front() {
            Some(Reply::Answer(answer)) => Ok(QueryAnswer {
                answer,
                confidence_score: 0.7,
                sources: Vec::new(),
            }),
            Some(Reply::ServerError(status, detail)) => Err(ApiError::Server {
                endpoint: "/ask-question",
                status,
                detail: detail.to_owned(),
            }),
            None => Err(Self::missing("/ask-question")),
        }
    }

    async fn upload_documents(&self, files: Vec<UploadFile>) -> Result<UploadSummary, ApiError> {
        self.record("/upload-documents");
        let summary = UploadSummary {
            documents_processed: u64::try_from(files.len()).unwrap(),
            total_chunks: 10,
            vector_db_updated: true,
            processing_time: 0.0,
        };
        self.uploads.lock().unwrap().push(files);
        Ok(summary)
    }

    async fn vector_store_stats(&self) -> Result<VectorStoreStats, ApiError> {
        self.record("/vector-store-stats");
        Ok(VectorStoreStats {
            total_documents: 3,
            collection_name: Some("45q_documents".to_owned()),
        })
    }

    async fn assessment_prompt(&self) -> Result<String, ApiError> {
        self.record("/assessment-prompt");
        self.prompt
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| Self::missing("/assessment-prompt"))
    }

    async fn regenerate_question_base(&self) -> Result<String, ApiError> {
        self.record("/regenerate-question-base");
        Ok("generated 42 questions".to_owned())
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.record("/health");
        Ok(HealthStatus {
            status: "healthy".to_owned(),
            version: "1.0.0".to_owned(),
            timestamp: "2024-01-01T00:00:00".to_owned(),
        })
    }
}
