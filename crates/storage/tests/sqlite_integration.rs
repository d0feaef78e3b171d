use credit_core::model::{AnswerStore, QuestionId, SavedProgress, SessionId};
use credit_core::time::fixed_now;
use storage::repository::{ProgressRepository, Storage, StorageError};
use storage::sqlite::SqliteRepository;

fn build_progress(session: &str, answers: &[(&str, &str)]) -> SavedProgress {
    let mut store = AnswerStore::new();
    for (id, value) in answers {
        store.set(QuestionId::new(*id), *value);
    }
    SavedProgress {
        session_id: SessionId::new(session).unwrap(),
        answers: store,
        saved_at: fixed_now(),
    }
}

#[tokio::test]
async fn sqlite_roundtrip_persists_answers() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_progress_roundtrip?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert!(repo.load_progress().await.unwrap().is_none());

    let progress = build_progress(
        "company-1700000000000",
        &[("0", "Industrial facility"), ("3", "Other: saline aquifer")],
    );
    repo.save_progress(&progress).await.unwrap();

    let loaded = repo.load_progress().await.unwrap().expect("saved row");
    assert_eq!(loaded, progress);
    assert_eq!(
        loaded.answers.get(&QuestionId::new("3")),
        Some("Other: saline aquifer")
    );
}

#[tokio::test]
async fn sqlite_keeps_a_single_record() {
    let storage = Storage::sqlite("sqlite:file:memdb_progress_single?mode=memory&cache=shared")
        .await
        .expect("storage");

    storage
        .progress
        .save_progress(&build_progress("company-1", &[("a", "1")]))
        .await
        .unwrap();
    storage
        .progress
        .save_progress(&build_progress("company-2", &[("b", "2")]))
        .await
        .unwrap();

    let loaded = storage.progress.load_progress().await.unwrap().unwrap();
    assert_eq!(loaded.session_id.as_str(), "company-2");
    assert_eq!(loaded.answers.get(&QuestionId::new("a")), None);

    storage.progress.clear_progress().await.unwrap();
    assert!(storage.progress.load_progress().await.unwrap().is_none());
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_progress_migrate?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("first migrate");
    repo.migrate().await.expect("second migrate");

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schema_migrations")
        .fetch_one(repo.pool())
        .await
        .unwrap();
    assert_eq!(applied, 1);
}

#[tokio::test]
async fn corrupt_row_surfaces_serialization_error() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_progress_corrupt?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    sqlx::query(
        "INSERT INTO saved_progress (id, session_id, answers, saved_at) VALUES (1, 'company-1', 'not json', ?1)",
    )
    .bind(fixed_now())
    .execute(repo.pool())
    .await
    .unwrap();

    let err = repo.load_progress().await.unwrap_err();
    assert!(matches!(err, StorageError::Serialization(_)));
}
