//! Database initialization tests

use stagebook_common::db::init_database;

#[tokio::test]
async fn init_creates_database_file_and_schema() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("nested").join("stagebook.db");

    let pool = init_database(&db_path).await.unwrap();
    assert!(db_path.exists());

    // schema is queryable
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM venues")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn init_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("stagebook.db");

    let pool = init_database(&db_path).await.unwrap();
    drop(pool);

    // second open against the same file must not fail or clobber schema
    let pool = init_database(&db_path).await.unwrap();
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shows")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}
