#![forbid(unsafe_code)]

pub mod api;
pub mod app_services;
pub mod assessment;
pub mod chat;
pub mod error;
pub mod panels;
pub mod progress_service;
pub mod prompts;
pub mod questionnaire;

pub use credit_core::Clock;

pub use api::{ApiConfig, AssessmentApi, HttpAssessmentApi};
pub use app_services::AppServices;
pub use assessment::{StepController, StepOutcome};
pub use chat::{ChatController, ChatEntry, ChatReply};
pub use error::{
    ApiConfigError, ApiError, AppServicesError, ChatError, PanelError, ProgressError,
    QuestionnaireError, StepError,
};
pub use panels::{ForecastService, KnowledgeService};
pub use progress_service::ProgressService;
pub use questionnaire::{CategoryGroup, EnhancedQuestionnaire};
