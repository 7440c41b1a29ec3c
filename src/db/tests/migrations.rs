use crate::db::Database;
use tempfile::NamedTempFile;

#[tokio::test]
async fn test_migrations_create_schema() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = Database::new(temp_file.path()).await.unwrap();

    // Both tables exist and are queryable
    let runs: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM runs")
        .fetch_one(&db.pool)
        .await
        .unwrap();
    assert_eq!(runs, 0);

    let entries: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM seller_entries")
        .fetch_one(&db.pool)
        .await
        .unwrap();
    assert_eq!(entries, 0);

    let version: i64 = sqlx::query_scalar("SELECT MAX(version) FROM schema_version")
        .fetch_one(&db.pool)
        .await
        .unwrap();
    assert_eq!(version, 1);

    db.close().await;
}

#[tokio::test]
async fn test_reopen_is_idempotent() {
    let temp_file = NamedTempFile::new().unwrap();

    let db = Database::new(temp_file.path()).await.unwrap();
    let run_id = db
        .create_scheduled_run(chrono::Utc::now().date_naive())
        .await
        .unwrap();
    db.close().await;

    // Reopening must not re-apply migrations or lose data
    let db = Database::new(temp_file.path()).await.unwrap();
    let run = db.get_run(&run_id).await.unwrap();
    assert!(run.is_some());

    let version: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schema_version")
        .fetch_one(&db.pool)
        .await
        .unwrap();
    assert_eq!(version, 1);

    db.close().await;
}

#[tokio::test]
async fn test_creates_parent_directory() {
    let temp_dir = tempfile::tempdir().unwrap();
    let nested = temp_dir.path().join("data").join("crawler.db");

    let db = Database::new(&nested).await.unwrap();
    assert!(nested.exists());
    db.close().await;
}
