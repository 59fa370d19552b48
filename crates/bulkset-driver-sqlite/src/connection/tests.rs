//! SQLite connection tests

use super::*;
use bulkset_core::Value;

fn test_connection() -> SqliteConnection {
    let conn = SqliteConnection::open_in_memory().expect("open in-memory database");
    conn.execute_batch(
        "CREATE TABLE users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT,
            status TEXT DEFAULT 'pending'
        );",
    )
    .expect("create schema");
    conn
}

#[tokio::test]
async fn executes_statements_and_reports_affected_rows() {
    let conn = test_connection();
    let result = conn
        .execute("INSERT INTO users (name) VALUES ('a'),('b')")
        .await
        .unwrap();
    assert_eq!(result.affected_rows, 2);
    assert!(!result.has_rows());
}

#[tokio::test]
async fn queries_collect_rows_and_column_names() {
    let conn = test_connection();
    conn.execute("INSERT INTO users (name, email) VALUES ('a', 'a@x.com')")
        .await
        .unwrap();

    let result = conn
        .execute("SELECT id, name, email FROM users ORDER BY id")
        .await
        .unwrap();
    assert_eq!(result.row_count(), 1);
    assert_eq!(result.column_count(), 3);
    assert_eq!(result.rows[0].get_by_name("id"), Some(&Value::Int64(1)));
    assert_eq!(
        result.rows[0].get_by_name("email"),
        Some(&Value::String("a@x.com".to_string()))
    );
}

#[tokio::test]
async fn returning_clauses_yield_rows() {
    let conn = test_connection();
    let result = conn
        .execute("INSERT INTO users (name) VALUES ('a') RETURNING id")
        .await
        .unwrap();
    assert_eq!(result.row_count(), 1);
    assert_eq!(result.rows[0].get_by_name("id"), Some(&Value::Int64(1)));
}

#[tokio::test]
async fn introspects_column_metadata() {
    let conn = test_connection();
    let columns = conn.columns("users").await.unwrap();

    let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["id", "name", "email", "status"]);

    let name = &columns[1];
    assert!(!name.nullable);

    let status = &columns[3];
    assert_eq!(status.default_value, Some("'pending'".to_string()));
    assert_eq!(
        status.declared_default(),
        Some(Value::String("pending".to_string()))
    );
}

#[tokio::test]
async fn introspecting_a_missing_table_yields_no_columns() {
    let conn = test_connection();
    let columns = conn.columns("missing").await.unwrap();
    assert!(columns.is_empty());
}

#[tokio::test]
async fn invalid_sql_surfaces_as_query_errors() {
    let conn = test_connection();
    let err = conn.execute("NOT SQL").await.err().expect("should fail");
    assert!(matches!(err, BulksetError::Query(_)));
}

#[tokio::test]
async fn opens_a_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.db");
    let path = path.to_str().unwrap();

    {
        let conn = SqliteConnection::open(path).unwrap();
        conn.execute_batch("CREATE TABLE t (id INTEGER)").unwrap();
    }

    let conn = SqliteConnection::open(path).unwrap();
    let result = conn.execute("SELECT COUNT(*) FROM t").await.unwrap();
    assert_eq!(result.rows[0].get(0), Some(&Value::Int64(0)));
}
