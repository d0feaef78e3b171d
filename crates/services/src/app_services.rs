use std::sync::Arc;

use credit_core::completion::{CompletionPolicy, LexicalCompletionPolicy};
use credit_core::model::SessionId;
use storage::repository::Storage;

use crate::Clock;
use crate::api::{ApiConfig, AssessmentApi, HttpAssessmentApi};
use crate::assessment::StepController;
use crate::chat::ChatController;
use crate::error::AppServicesError;
use crate::panels::{ForecastService, KnowledgeService};
use crate::progress_service::ProgressService;
use crate::questionnaire::EnhancedQuestionnaire;

/// Assembles app-facing services around one backend client and one store.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    session_id: SessionId,
    api: Arc<dyn AssessmentApi>,
    policy: Arc<dyn CompletionPolicy>,
    progress: ProgressService,
    forecast: ForecastService,
    knowledge: KnowledgeService,
}

impl AppServices {
    /// Build services backed by the HTTP client and `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the client or storage cannot be set up.
    pub async fn new_sqlite(
        db_url: &str,
        api_config: &ApiConfig,
        clock: Clock,
        session_id: Option<SessionId>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let api: Arc<dyn AssessmentApi> = Arc::new(HttpAssessmentApi::new(api_config)?);
        Ok(Self::new(api, storage, clock, session_id))
    }

    /// Build services over any backend and storage, e.g. fakes in tests.
    #[must_use]
    pub fn new(
        api: Arc<dyn AssessmentApi>,
        storage: Storage,
        clock: Clock,
        session_id: Option<SessionId>,
    ) -> Self {
        let session_id = session_id.unwrap_or_else(|| SessionId::generate(&clock));
        Self {
            clock,
            session_id,
            progress: ProgressService::new(clock, Arc::clone(&storage.progress)),
            forecast: ForecastService::new(Arc::clone(&api)),
            knowledge: KnowledgeService::new(Arc::clone(&api)),
            policy: Arc::new(LexicalCompletionPolicy::default()),
            api,
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: Arc<dyn CompletionPolicy>) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Session id used when the user does not supply one.
    #[must_use]
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    #[must_use]
    pub fn api(&self) -> Arc<dyn AssessmentApi> {
        Arc::clone(&self.api)
    }

    #[must_use]
    pub fn progress(&self) -> &ProgressService {
        &self.progress
    }

    #[must_use]
    pub fn forecast(&self) -> &ForecastService {
        &self.forecast
    }

    #[must_use]
    pub fn knowledge(&self) -> &KnowledgeService {
        &self.knowledge
    }

    #[must_use]
    pub fn step_controller(&self, session_id: SessionId) -> StepController {
        StepController::new(self.api(), session_id)
    }

    #[must_use]
    pub fn questionnaire(&self, session_id: SessionId) -> EnhancedQuestionnaire {
        EnhancedQuestionnaire::new(self.api(), self.progress.clone(), session_id)
    }

    /// Start an interview, loading the prompt template from the backend.
    pub async fn interview(&self) -> ChatController {
        ChatController::start(self.api(), Arc::clone(&self.policy)).await
    }
}
