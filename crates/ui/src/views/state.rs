use dioxus::prelude::*;
use services::{
    ApiError, ChatError, PanelError, ProgressError, QuestionnaireError, StepError,
};

/// User-facing failure shown by a view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewError {
    /// Local validation; nothing was sent.
    Invalid(String),
    /// The backend could not be reached or refused the request.
    Backend(String),
    /// Saved progress could not be read or written.
    Storage(String),
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Invalid(message) => message.clone(),
            Self::Backend(detail) => format!("Error: {detail}"),
            Self::Storage(detail) => format!("Could not access saved progress: {detail}"),
            Self::Unknown => "Something went wrong. Please try again.".to_string(),
        }
    }
}

impl From<ApiError> for ViewError {
    fn from(err: ApiError) -> Self {
        Self::Backend(err.to_string())
    }
}

impl From<StepError> for ViewError {
    fn from(err: StepError) -> Self {
        match err {
            StepError::Api(api) => api.into(),
            other => Self::Invalid(other.to_string()),
        }
    }
}

impl From<ChatError> for ViewError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::Api(api) => api.into(),
            other => Self::Invalid(other.to_string()),
        }
    }
}

impl From<ProgressError> for ViewError {
    fn from(err: ProgressError) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<QuestionnaireError> for ViewError {
    fn from(err: QuestionnaireError) -> Self {
        match err {
            QuestionnaireError::Api(api) => api.into(),
            QuestionnaireError::Progress(progress) => progress.into(),
            QuestionnaireError::Export { .. } => Self::Storage(err.to_string()),
            other => Self::Invalid(other.to_string()),
        }
    }
}

impl From<PanelError> for ViewError {
    fn from(err: PanelError) -> Self {
        match err {
            PanelError::Api(api) => api.into(),
            other => Self::Invalid(other.to_string()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(err.clone()),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
