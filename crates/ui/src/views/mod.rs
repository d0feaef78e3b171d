mod ask;
mod assessment;
mod components;
mod controller_slot;
mod documents;
mod forecast;
mod interview;
mod question_input;
mod questionnaire;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use ask::AskView;
pub use assessment::AssessmentView;
pub use documents::DocumentsView;
pub use forecast::ForecastView;
pub use interview::InterviewView;
pub use question_input::QuestionInput;
pub use questionnaire::QuestionnaireView;
pub use state::{ViewError, ViewState, view_state_from_resource};
