mod assessment_vm;
mod chat_vm;
mod forecast_vm;
mod format;
mod knowledge_vm;
mod markdown_vm;
mod question_vm;

pub use assessment_vm::{
    EligibilityVm, GuidanceVm, ProgressVm, QuestionGroupVm, QuestionItemVm, QuestionnaireVm,
    StepVm, map_eligibility, map_guidance, map_progress, saved_progress_line,
};
pub use chat_vm::{ChatBody, ChatLineVm, map_chat_entries};
pub use forecast_vm::{
    DraftField, FACILITY_TYPES, ForecastPeriodVm, ForecastRowVm, ForecastVm, SEQUESTRATION_METHODS,
    map_forecast, update_draft,
};
pub use format::{format_amount, format_confidence, format_datetime, format_dollars};
pub use knowledge_vm::{AnswerVm, SourceVm, map_query_answer, stats_line, upload_status};
pub use markdown_vm::{assistant_html, markdown_to_html, render_assistant_markdown, sanitize_html};
pub use question_vm::{AnswerUpdate, BOOLEAN_CHOICES, ChoiceState, InputWidget};
