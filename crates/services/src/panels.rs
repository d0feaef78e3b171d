//! Thin services behind the forecast, query and document panels.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use credit_core::model::{
    ForecastDraft, ForecastResponse, HealthStatus, QueryAnswer, SessionId, UploadSummary,
    VectorStoreStats,
};

use crate::api::{AssessmentApi, QuestionRequest, UploadFile};
use crate::error::PanelError;
use crate::prompts::DOCUMENT_ANALYSIS_PROMPT;

#[derive(Clone)]
pub struct ForecastService {
    api: Arc<dyn AssessmentApi>,
}

impl ForecastService {
    #[must_use]
    pub fn new(api: Arc<dyn AssessmentApi>) -> Self {
        Self { api }
    }

    /// Validate the form and request a credit projection.
    ///
    /// # Errors
    ///
    /// Returns `PanelError::Draft` for invalid fields (no request is made),
    /// or `PanelError::Api`.
    pub async fn forecast(
        &self,
        draft: &ForecastDraft,
        session_id: &SessionId,
    ) -> Result<ForecastResponse, PanelError> {
        let request = draft.validate(session_id.clone())?;
        debug!(%session_id, tonnes = request.annual_co2_captured, "requesting forecast");
        Ok(self.api.forecast_credits(&request).await?)
    }
}

/// Document questions, uploads and vector-store administration.
#[derive(Clone)]
pub struct KnowledgeService {
    api: Arc<dyn AssessmentApi>,
}

impl KnowledgeService {
    #[must_use]
    pub fn new(api: Arc<dyn AssessmentApi>) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// Returns `PanelError::EmptyQuestion` for blank input (no request is
    /// made), or `PanelError::Api`.
    pub async fn ask(&self, question: &str) -> Result<QueryAnswer, PanelError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(PanelError::EmptyQuestion);
        }
        Ok(self.api.ask_question(&QuestionRequest::new(question)).await?)
    }

    /// Ask the knowledge base which eligibility questions the uploaded
    /// documents suggest.
    ///
    /// # Errors
    ///
    /// Returns `PanelError::Api` if the request fails.
    pub async fn analyze_documents_for_questions(&self) -> Result<QueryAnswer, PanelError> {
        info!("analyzing documents for assessment questions");
        self.ask(DOCUMENT_ANALYSIS_PROMPT).await
    }

    /// Read the files at `paths` and upload them in one multipart request.
    ///
    /// # Errors
    ///
    /// Returns `PanelError::NoFiles` for an empty selection, `PanelError::Read`
    /// if a file cannot be read, or `PanelError::Api`.
    pub async fn upload_paths(&self, paths: &[PathBuf]) -> Result<UploadSummary, PanelError> {
        if paths.is_empty() {
            return Err(PanelError::NoFiles);
        }
        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            files.push(read_upload(path).await?);
        }
        let summary = self.api.upload_documents(files).await?;
        info!(
            documents = summary.documents_processed,
            chunks = summary.total_chunks,
            "documents uploaded"
        );
        Ok(summary)
    }

    /// # Errors
    ///
    /// Returns `PanelError::Api` if the request fails.
    pub async fn stats(&self) -> Result<VectorStoreStats, PanelError> {
        Ok(self.api.vector_store_stats().await?)
    }

    /// Ask the server to rebuild its question base; returns the generator log.
    ///
    /// # Errors
    ///
    /// Returns `PanelError::Api` if the request fails or the server reports
    /// that generation failed.
    pub async fn regenerate_question_base(&self) -> Result<String, PanelError> {
        let output = self.api.regenerate_question_base().await?;
        info!("question base regenerated");
        Ok(output)
    }

    /// # Errors
    ///
    /// Returns `PanelError::Api` if the backend is unreachable or unhealthy.
    pub async fn health(&self) -> Result<HealthStatus, PanelError> {
        Ok(self.api.health().await?)
    }
}

async fn read_upload(path: &Path) -> Result<UploadFile, PanelError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| PanelError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    let file_name = path
        .file_name()
        .map_or_else(|| "document".to_owned(), |name| name.to_string_lossy().into_owned());
    Ok(UploadFile { file_name, bytes })
}
