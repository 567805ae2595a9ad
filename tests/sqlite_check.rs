use dbcc::introspect::sqlite;
use dbcc::prelude::*;
use pretty_assertions::assert_eq;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

async fn database(ddl: &[&str]) -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    for stmt in ddl {
        sqlx::query(stmt).execute(&pool).await.expect("Failed to run DDL");
    }
    pool
}

#[tokio::test]
async fn test_reflects_tables_and_columns_in_order() {
    let pool = database(&[
        "CREATE TABLE users (id INTEGER PRIMARY KEY, email varchar(255) NOT NULL, bio TEXT)",
        "CREATE TABLE accounts (id INTEGER, owner_id INTEGER)",
    ])
    .await;

    let snapshot = sqlite::snapshot(&pool).await.unwrap();

    let names: Vec<String> = snapshot.tables.iter().map(|t| t.qualified_name()).collect();
    assert_eq!(names, vec!["accounts", "users"]);

    let users = snapshot.table("users").unwrap();
    assert_eq!(
        users.columns,
        vec![
            Column::new("id", "INTEGER"),
            Column::new("email", "VARCHAR(255)"),
            Column::new("bio", "TEXT"),
        ]
    );
}

#[tokio::test]
async fn test_internal_tables_are_skipped() {
    // AUTOINCREMENT creates sqlite_sequence
    let pool = database(&["CREATE TABLE t (id INTEGER PRIMARY KEY AUTOINCREMENT)"]).await;

    let snapshot = sqlite::snapshot(&pool).await.unwrap();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.tables[0].name, "t");
}

#[tokio::test]
async fn test_breaking_changes_between_databases() {
    let old = database(&[
        "CREATE TABLE users (id INTEGER, email TEXT, age INTEGER)",
        "CREATE TABLE sessions (id INTEGER)",
    ])
    .await;
    let new = database(&[
        "CREATE TABLE users (id INTEGER, age BIGINT, created_at TIMESTAMP)",
        "CREATE TABLE audit_log (id INTEGER)",
    ])
    .await;

    let report = diff(
        &sqlite::snapshot(&old).await.unwrap(),
        &sqlite::snapshot(&new).await.unwrap(),
    );

    assert_eq!(
        report.errors,
        vec![
            "table sessions not found in new DB",
            "column users.email not found in new DB",
        ]
    );
    assert_eq!(
        report.warnings,
        vec!["column users.age has type INTEGER, while column users.age has type BIGINT"]
    );
    assert_eq!(exit_status(&report), 1);
}

#[tokio::test]
async fn test_identical_databases_are_clean() {
    let ddl = ["CREATE TABLE t (id INTEGER, name VARCHAR(20))"];
    let old = database(&ddl).await;
    let new = database(&ddl).await;

    let report = diff(
        &sqlite::snapshot(&old).await.unwrap(),
        &sqlite::snapshot(&new).await.unwrap(),
    );
    assert!(report.is_clean());
    assert_eq!(exit_status(&report), 0);
}

#[tokio::test]
async fn test_introspector_connects_by_url() {
    let db = Introspector::connect("sqlite::memory:").await.unwrap();
    assert_eq!(db.dialect(), Dialect::Sqlite);

    let snapshot = db.snapshot(&IntrospectOptions::default()).await.unwrap();
    assert!(snapshot.is_empty());
    db.close().await;
}

#[tokio::test]
async fn test_unsupported_url_fails_before_diff() {
    let err = snapshot_url("mssql://sa@db/app", &IntrospectOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DbccError::UnsupportedScheme(_)));
}
