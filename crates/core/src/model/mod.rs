mod answer;
mod chat;
mod endpoint;
mod forecast;
mod guidance;
mod ids;
mod progress;
mod question;

pub use answer::{AnswerStore, CollectedAnswer};
pub use chat::{ChatRole, ChatTurn, Transcript};
pub use endpoint::{ApiBaseUrl, ApiBaseUrlError};
pub use forecast::{
    CreditForecast, FacilityProfile, ForecastDraft, ForecastDraftError, ForecastPeriod,
    ForecastRequest, ForecastResponse,
};
pub use guidance::{
    DetailedGuidance, EligibilityResult, FacilitySnapshot, HealthStatus, QueryAnswer, RagGuidance,
    SourceMetadata, SourceRef, UploadSummary, VectorStoreStats, display_value,
};
pub use ids::{QuestionId, SessionId, SessionIdError};
pub use progress::{SavedProgress, StepProgress};
pub use question::{Question, QuestionKind};
