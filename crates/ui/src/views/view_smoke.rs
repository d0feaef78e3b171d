use credit_core::model::{Question, QuestionKind, VectorStoreStats};

use super::test_harness::{FakeBackend, ViewKind, setup_view_harness};

fn facility_questions() -> Vec<Question> {
    vec![
        Question::new("facility_type", "What type of facility is this?", QuestionKind::Select)
            .with_options(["Industrial", "Direct air capture", "Other"])
            .with_category("Facility", "facility"),
        Question::new("annual_tons", "How many tons of CO2 per year?", QuestionKind::Number)
            .with_category("Capture", "capture"),
    ]
}

#[tokio::test(flavor = "current_thread")]
async fn assessment_view_smoke_offers_start() {
    let mut harness = setup_view_harness(ViewKind::Assessment, FakeBackend::default());
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Step-by-step assessment"), "missing title in {html}");
    assert!(html.contains("Start assessment"), "missing start button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn questionnaire_view_smoke_groups_questions_by_category() {
    let backend = FakeBackend {
        questions: facility_questions(),
        ..FakeBackend::default()
    };
    let mut harness = setup_view_harness(ViewKind::Questionnaire, backend);
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Facility"), "missing category in {html}");
    assert!(html.contains("Capture"), "missing category in {html}");
    assert!(html.contains("What type of facility is this?"), "missing question in {html}");
    assert!(html.contains("Direct air capture"), "missing option in {html}");
    assert!(html.contains("Answered 0 of 2"), "missing counter in {html}");
    assert!(!html.contains("Please specify"), "other field shown too early in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn questionnaire_view_smoke_reports_empty_question_base() {
    let mut harness = setup_view_harness(ViewKind::Questionnaire, FakeBackend::default());
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("the question base is empty"), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn interview_view_smoke_shows_opening_question() {
    let mut harness = setup_view_harness(ViewKind::Interview, FakeBackend::default());
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("assistant-message"), "missing assistant line in {html}");
    assert!(html.contains("To get started"), "missing opening question in {html}");
    assert!(html.contains("Complete assessment"), "missing manual trigger in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn forecast_view_smoke_renders_defaults() {
    let mut harness = setup_view_harness(ViewKind::Forecast, FakeBackend::default());
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Calculate forecast"), "missing submit in {html}");
    assert!(html.contains("Geological storage"), "missing method in {html}");
    assert!(html.contains("Capture efficiency (%)"), "missing efficiency field in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn ask_view_smoke_renders_form() {
    let mut harness = setup_view_harness(ViewKind::Ask, FakeBackend::default());
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Ask a question"), "missing title in {html}");
    assert!(html.contains("Analyze documents"), "missing analysis action in {html}");
    assert!(!html.contains("Sources"), "sources shown before asking in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn documents_view_smoke_renders_stats() {
    let backend = FakeBackend {
        stats: Some(VectorStoreStats {
            total_documents: 3,
            collection_name: Some("irs_guidance".into()),
        }),
        ..FakeBackend::default()
    };
    let mut harness = setup_view_harness(ViewKind::Documents, backend);
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("3 documents in irs_guidance"), "missing stats in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn documents_view_smoke_renders_error_state() {
    let mut harness = setup_view_harness(ViewKind::Documents, FakeBackend::default());
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("backend unavailable"), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}
