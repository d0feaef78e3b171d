use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};

use credit_core::model::{
    DetailedGuidance, ForecastRequest, ForecastResponse, HealthStatus, QueryAnswer, Question,
    SessionId, UploadSummary, VectorStoreStats,
};
use credit_core::time::fixed_now;
use services::api::{
    AnswerSubmission, AssessmentApi, AssessmentState, EnhancedAssessment,
    EnhancedAssessmentRequest, EnhancedQuestionSet, ProgressReport, QuestionRequest, UploadFile,
};
use services::{ApiError, AppServices, Clock};
use storage::repository::Storage;

use crate::context::{UiApp, build_app_context};
use crate::views::{
    AskView, AssessmentView, DocumentsView, ForecastView, InterviewView, QuestionnaireView,
};

/// Scripted backend for view tests.
#[derive(Default)]
pub struct FakeBackend {
    pub questions: Vec<Question>,
    pub start_state: Option<AssessmentState>,
    pub stats: Option<VectorStoreStats>,
    pub replies: Mutex<VecDeque<String>>,
}

fn unscripted(endpoint: &'static str) -> ApiError {
    ApiError::Server {
        endpoint,
        status: 503,
        detail: "backend unavailable".to_string(),
    }
}

#[async_trait]
impl AssessmentApi for FakeBackend {
    async fn enhanced_questions(&self) -> Result<EnhancedQuestionSet, ApiError> {
        Ok(EnhancedQuestionSet {
            total_questions: u32::try_from(self.questions.len()).unwrap_or_default(),
            categories: 1,
            questions: self.questions.clone(),
        })
    }

    async fn start_assessment(&self, _session_id: &SessionId) -> Result<AssessmentState, ApiError> {
        self.start_state
            .clone()
            .ok_or_else(|| unscripted("/assess-eligibility"))
    }

    async fn submit_answer(
        &self,
        _submission: &AnswerSubmission,
    ) -> Result<AssessmentState, ApiError> {
        Err(unscripted("/submit-answer"))
    }

    async fn assessment_progress(
        &self,
        _session_id: &SessionId,
    ) -> Result<ProgressReport, ApiError> {
        Err(unscripted("/assessment-progress"))
    }

    async fn complete_enhanced_assessment(
        &self,
        _request: &EnhancedAssessmentRequest,
    ) -> Result<EnhancedAssessment, ApiError> {
        Err(unscripted("/complete-enhanced-assessment"))
    }

    async fn detailed_guidance(
        &self,
        _session_id: &SessionId,
    ) -> Result<DetailedGuidance, ApiError> {
        Err(unscripted("/detailed-guidance"))
    }

    async fn forecast_credits(
        &self,
        _request: &ForecastRequest,
    ) -> Result<ForecastResponse, ApiError> {
        Err(unscripted("/forecast-credits"))
    }

    async fn ask_question(&self, _request: &QuestionRequest) -> Result<QueryAnswer, ApiError> {
        let reply = self.replies.lock().unwrap().pop_front();
        reply
            .map(|answer| QueryAnswer {
                answer,
                confidence_score: 0.9,
                sources: Vec::new(),
            })
            .ok_or_else(|| unscripted("/ask-question"))
    }

    async fn upload_documents(&self, _files: Vec<UploadFile>) -> Result<UploadSummary, ApiError> {
        Err(unscripted("/upload-documents"))
    }

    async fn vector_store_stats(&self) -> Result<VectorStoreStats, ApiError> {
        self.stats
            .clone()
            .ok_or_else(|| unscripted("/vector-store-stats"))
    }

    async fn assessment_prompt(&self) -> Result<String, ApiError> {
        Ok("You are a 45Q assessor.\n\nCONVERSATION SO FAR:\n{conversation}".to_string())
    }

    async fn regenerate_question_base(&self) -> Result<String, ApiError> {
        Err(unscripted("/regenerate-question-base"))
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        Err(unscripted("/health"))
    }
}

#[derive(Clone)]
struct TestApp {
    services: Arc<AppServices>,
}

impl UiApp for TestApp {
    fn services(&self) -> Arc<AppServices> {
        Arc::clone(&self.services)
    }

    fn api_base_url(&self) -> String {
        "http://backend.test".to_string()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Assessment,
    Questionnaire,
    Interview,
    Forecast,
    Ask,
    Documents,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    match use_context::<ViewKind>() {
        ViewKind::Assessment => rsx! { AssessmentView {} },
        ViewKind::Questionnaire => rsx! { QuestionnaireView {} },
        ViewKind::Interview => rsx! { InterviewView {} },
        ViewKind::Forecast => rsx! { ForecastView {} },
        ViewKind::Ask => rsx! { AskView {} },
        ViewKind::Documents => rsx! { DocumentsView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        for _ in 0..3 {
            let _ = tokio::time::timeout(
                std::time::Duration::from_millis(50),
                self.dom.wait_for_work(),
            )
            .await;
            self.dom.render_immediate(&mut NoOpMutations);
            self.dom.process_events();
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind, backend: FakeBackend) -> ViewHarness {
    let services = AppServices::new(
        Arc::new(backend),
        Storage::in_memory(),
        Clock::fixed(fixed_now()),
        Some(SessionId::new("company-test").expect("valid session id")),
    );
    let app = Arc::new(TestApp {
        services: Arc::new(services),
    });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });
    ViewHarness { dom }
}
