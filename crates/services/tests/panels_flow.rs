mod common;

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use common::{FakeApi, Reply};
use credit_core::model::{ForecastDraft, ForecastDraftError, SessionId};
use services::prompts::DOCUMENT_ANALYSIS_PROMPT;
use services::{AssessmentApi, ForecastService, KnowledgeService, PanelError};

fn session() -> SessionId {
    SessionId::new("company-1").unwrap()
}

fn draft() -> ForecastDraft {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let mut draft = ForecastDraft::with_start_date(start);
    draft.annual_co2_captured = "100,000".to_owned();
    draft
}

#[tokio::test]
async fn forecast_sends_validated_request() {
    let api = Arc::new(FakeApi::new());
    let service = ForecastService::new(Arc::clone(&api) as Arc<dyn AssessmentApi>);

    let response = service.forecast(&draft(), &session()).await.unwrap();
    assert_eq!(response.session_id, "company-1");

    let request = api.forecasts.lock().unwrap()[0].clone();
    assert!((request.annual_co2_captured - 100_000.0).abs() < f64::EPSILON);
    assert!((request.capture_efficiency - 0.9).abs() < 1e-9);
}

#[tokio::test]
async fn invalid_forecast_makes_no_request() {
    let api = Arc::new(FakeApi::new());
    let service = ForecastService::new(Arc::clone(&api) as Arc<dyn AssessmentApi>);
    let mut bad = draft();
    bad.annual_co2_captured = String::new();

    let err = service.forecast(&bad, &session()).await.unwrap_err();

    assert!(matches!(err, PanelError::Draft(ForecastDraftError::Missing { .. })));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn blank_question_makes_no_request() {
    let api = Arc::new(FakeApi::new());
    let service = KnowledgeService::new(Arc::clone(&api) as Arc<dyn AssessmentApi>);

    let err = service.ask("   ").await.unwrap_err();

    assert!(matches!(err, PanelError::EmptyQuestion));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn document_analysis_sends_the_canned_prompt() {
    let api = Arc::new(FakeApi::with_replies([Reply::answer(
        "1. What type of facility captures the CO2?",
    )]));
    let service = KnowledgeService::new(Arc::clone(&api) as Arc<dyn AssessmentApi>);

    let answer = service.analyze_documents_for_questions().await.unwrap();

    assert!(answer.answer.contains("What type of facility"));
    assert_eq!(api.calls(), vec!["/ask-question"]);
    let asked = api.asked.lock().unwrap()[0].clone();
    assert_eq!(asked.question, DOCUMENT_ANALYSIS_PROMPT);
    assert!(asked.question.starts_with("Based on the 45Q tax credit documents"));
    assert!(asked.context.is_none());
}

#[tokio::test]
async fn upload_reads_files_and_sends_names() {
    let api = Arc::new(FakeApi::new());
    let service = KnowledgeService::new(Arc::clone(&api) as Arc<dyn AssessmentApi>);
    let path = std::env::temp_dir().join(format!("credit45-upload-{}.txt", std::process::id()));
    tokio::fs::write(&path, b"45Q guidance").await.unwrap();

    let summary = service.upload_paths(&[path.clone()]).await.unwrap();
    tokio::fs::remove_file(&path).await.unwrap();

    assert_eq!(summary.documents_processed, 1);
    let uploaded = api.uploads.lock().unwrap()[0].clone();
    assert_eq!(uploaded[0].bytes, b"45Q guidance");
    assert_eq!(
        uploaded[0].file_name,
        path.file_name().unwrap().to_string_lossy()
    );
}

#[tokio::test]
async fn upload_requires_files_that_exist() {
    let api = Arc::new(FakeApi::new());
    let service = KnowledgeService::new(Arc::clone(&api) as Arc<dyn AssessmentApi>);

    assert!(matches!(
        service.upload_paths(&[]).await.unwrap_err(),
        PanelError::NoFiles
    ));
    let missing = PathBuf::from("/definitely/not/here.pdf");
    assert!(matches!(
        service.upload_paths(&[missing]).await.unwrap_err(),
        PanelError::Read { .. }
    ));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn admin_calls_pass_through() {
    let api = Arc::new(FakeApi::new());
    let service = KnowledgeService::new(Arc::clone(&api) as Arc<dyn AssessmentApi>);

    assert_eq!(service.stats().await.unwrap().total_documents, 3);
    assert_eq!(service.health().await.unwrap().status, "healthy");
    assert!(service.regenerate_question_base().await.unwrap().contains("42"));
    assert_eq!(
        api.calls(),
        vec!["/vector-store-stats", "/health", "/regenerate-question-base"]
    );
}
