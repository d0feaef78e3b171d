use credit_core::model::{QueryAnswer, UploadSummary, VectorStoreStats};

use crate::vm::{format_confidence, markdown_to_html};

const SOURCE_EXCERPT_CHARS: usize = 200;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceVm {
    pub excerpt: String,
    pub file_name: String,
    pub page: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerVm {
    pub answer_html: String,
    pub confidence: String,
    pub sources: Vec<SourceVm>,
}

#[must_use]
pub fn map_query_answer(answer: &QueryAnswer) -> AnswerVm {
    AnswerVm {
        answer_html: markdown_to_html(&answer.answer),
        confidence: format!("Confidence: {}", format_confidence(answer.confidence_score)),
        sources: answer
            .sources
            .iter()
            .map(|source| SourceVm {
                excerpt: source.excerpt(SOURCE_EXCERPT_CHARS),
                file_name: source
                    .metadata
                    .file_name
                    .clone()
                    .unwrap_or_else(|| "Unknown".to_string()),
                page: source.metadata.page_label(),
            })
            .collect(),
    }
}

#[must_use]
pub fn upload_status(summary: &UploadSummary) -> String {
    format!(
        "Processed {} document(s) into {} chunks in {:.1}s.",
        summary.documents_processed, summary.total_chunks, summary.processing_time
    )
}

#[must_use]
pub fn stats_line(stats: &VectorStoreStats) -> String {
    match stats.collection_name.as_deref() {
        Some(name) => format!("{} documents in {name}", stats.total_documents),
        None => format!("{} documents", stats.total_documents),
    }
}
