//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

use credit_core::model::{ApiBaseUrlError, ForecastDraftError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by the backend client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} returned {status}: {detail}")]
    Server {
        endpoint: &'static str,
        status: u16,
        detail: String,
    },
    #[error("unexpected response from {endpoint}: {reason}")]
    Envelope {
        endpoint: &'static str,
        reason: String,
    },
    #[error("{endpoint} reported failure: {message}")]
    Rejected {
        endpoint: &'static str,
        message: String,
    },
}

/// Errors emitted while reading backend client configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiConfigError {
    #[error(transparent)]
    BaseUrl(#[from] ApiBaseUrlError),
    #[error("timeout must be a positive number of seconds, got {raw:?}")]
    Timeout { raw: String },
}

/// Errors emitted by `StepController`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StepError {
    #[error("please enter an answer before continuing")]
    EmptyAnswer,
    #[error("no question is active; start the assessment first")]
    NoActiveQuestion,
    #[error("the assessment is not complete yet")]
    NotComplete,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by `ChatController`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatError {
    #[error("message is empty")]
    EmptyMessage,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by `EnhancedQuestionnaire`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuestionnaireError {
    #[error("the question base is empty; regenerate it on the server")]
    NoQuestions,
    #[error("please answer at least one question before completing the assessment")]
    NoAnswers,
    #[error("complete the assessment before exporting it")]
    NotCompleted,
    #[error("question {index} does not exist")]
    UnknownQuestion { index: usize },
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Progress(#[from] ProgressError),
    #[error("could not write {path}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by the forecast, query and document panels.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PanelError {
    #[error("please enter a question")]
    EmptyQuestion,
    #[error("please select at least one file")]
    NoFiles,
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Draft(#[from] ForecastDraftError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Api(#[from] ApiError),
}
