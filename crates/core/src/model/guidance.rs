use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Answer from the retrieval-backed question endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QueryAnswer {
    pub answer: String,
    #[serde(default)]
    pub confidence_score: f64,
    #[serde(default)]
    pub sources: Vec<SourceRef>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SourceRef {
    pub content: String,
    #[serde(default)]
    pub metadata: SourceMetadata,
}

impl SourceRef {
    /// First `max_chars` characters of the passage, with an ellipsis when cut.
    #[must_use]
    pub fn excerpt(&self, max_chars: usize) -> String {
        let mut chars = self.content.chars();
        let head: String = chars.by_ref().take(max_chars).collect();
        if chars.next().is_some() {
            format!("{head}...")
        } else {
            head
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceMetadata {
    #[serde(default)]
    pub file_name: Option<String>,
    /// Page numbers arrive as numbers or strings depending on the loader.
    #[serde(default)]
    pub page: Option<Value>,
}

impl SourceMetadata {
    #[must_use]
    pub fn page_label(&self) -> String {
        self.page
            .as_ref()
            .map_or_else(|| "N/A".to_string(), display_value)
    }
}

/// Post-assessment guidance for a finished step-by-step session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailedGuidance {
    #[serde(default)]
    pub rag_guidance: Option<RagGuidance>,
    #[serde(default)]
    pub facility_info: Option<FacilitySnapshot>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RagGuidance {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub confidence_score: f64,
}

/// Facility facts echoed back from the collected answers. Values are free-form.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FacilitySnapshot {
    #[serde(default)]
    pub facility_name: Option<Value>,
    #[serde(default)]
    pub facility_type: Option<Value>,
    #[serde(default)]
    pub location_state: Option<Value>,
    #[serde(default)]
    pub annual_co2_captured: Option<Value>,
}

/// Eligibility verdict attached to a completed step-by-step assessment.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub is_eligible: bool,
    #[serde(default)]
    pub applicable_provisions: Vec<String>,
    #[serde(default)]
    pub reasons: Vec<String>,
    #[serde(default)]
    pub requirements_not_met: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub estimated_credit_rate: Option<f64>,
    #[serde(default)]
    pub confidence_score: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadSummary {
    pub documents_processed: u64,
    pub total_chunks: u64,
    pub vector_db_updated: bool,
    #[serde(default)]
    pub processing_time: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorStoreStats {
    #[serde(default)]
    pub total_documents: u64,
    #[serde(default)]
    pub collection_name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub timestamp: String,
}

/// Render a loosely-typed JSON scalar the way a person would read it.
#[must_use]
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "Unknown".to_string(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

impl FacilitySnapshot {
    #[must_use]
    pub fn field(value: Option<&Value>) -> String {
        value.map_or_else(|| "Unknown".to_string(), display_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excerpt_truncates_on_char_boundaries() {
        let source = SourceRef {
            content: "é".repeat(5),
            metadata: SourceMetadata::default(),
        };
        assert_eq!(source.excerpt(3), "ééé...");
        assert_eq!(source.excerpt(5), "ééééé");
    }

    #[test]
    fn page_label_accepts_numbers_and_strings() {
        let numeric: SourceMetadata =
            serde_json::from_str(r#"{"file_name": "notice.pdf", "page": 12}"#).unwrap();
        assert_eq!(numeric.page_label(), "12");
        let text: SourceMetadata = serde_json::from_str(r#"{"page": "iv"}"#).unwrap();
        assert_eq!(text.page_label(), "iv");
        assert_eq!(SourceMetadata::default().page_label(), "N/A");
    }
}
