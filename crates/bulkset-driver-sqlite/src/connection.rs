//! SQLite connection implementation

use async_trait::async_trait;
use bulkset_core::{BulksetError, ColumnMeta, Connection, QueryResult, Result, Row, Value};
use parking_lot::Mutex;
use rusqlite::{Connection as RusqliteConnection, OpenFlags};
use std::time::Instant;

use crate::schema;

/// SQLite connection wrapper
pub struct SqliteConnection {
    conn: Mutex<RusqliteConnection>,
}

impl SqliteConnection {
    /// Open a SQLite database at `path`, creating it if necessary
    pub fn open(path: &str) -> Result<Self> {
        tracing::info!(path = %path, "opening SQLite database");

        let conn = if path == ":memory:" {
            RusqliteConnection::open_in_memory().map_err(|e| {
                BulksetError::Connection(format!("failed to open in-memory database: {}", e))
            })?
        } else {
            let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX;
            RusqliteConnection::open_with_flags(path, flags).map_err(|e| {
                BulksetError::Connection(format!(
                    "failed to open SQLite database at '{}': {}",
                    path, e
                ))
            })?
        };

        conn.pragma_update(None, "foreign_keys", "ON")
            .map_err(|e| BulksetError::Connection(format!("failed to enable foreign keys: {}", e)))?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database
    pub fn open_in_memory() -> Result<Self> {
        Self::open(":memory:")
    }

    /// Execute multiple SQL statements in one batch (schema setup, scripts)
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        let conn = self.conn.lock();
        conn.execute_batch(sql)
            .map_err(|e| BulksetError::Query(format!("failed to execute batch: {}", e)))
    }

    /// Run one statement. Statements that produce columns (SELECT, PRAGMA,
    /// INSERT ... RETURNING) collect their rows; everything else records the
    /// affected-row count.
    fn run(&self, sql: &str) -> Result<QueryResult> {
        let started = Instant::now();
        let conn = self.conn.lock();

        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| BulksetError::Query(format!("failed to prepare statement: {}", e)))?;

        if stmt.column_count() == 0 {
            let affected = stmt
                .execute([])
                .map_err(|e| BulksetError::Query(format!("failed to execute statement: {}", e)))?;
            tracing::debug!(affected_rows = affected, "statement executed");
            let mut result = QueryResult::empty();
            result.affected_rows = affected as u64;
            result.execution_time_ms = started.elapsed().as_millis() as u64;
            return Ok(result);
        }

        let (column_names, columns) = {
            let stmt_columns = stmt.columns();
            let names: Vec<String> = stmt_columns.iter().map(|c| c.name().to_string()).collect();
            let metas: Vec<ColumnMeta> = stmt_columns
                .iter()
                .enumerate()
                .map(|(ordinal, c)| ColumnMeta {
                    name: c.name().to_string(),
                    data_type: c.decl_type().unwrap_or("DYNAMIC").to_string(),
                    nullable: true,
                    ordinal,
                    default_value: None,
                })
                .collect();
            (names, metas)
        };

        let mut rows = Vec::new();
        let mut query_rows = stmt
            .query([])
            .map_err(|e| BulksetError::Query(format!("failed to execute query: {}", e)))?;
        while let Some(row) = query_rows
            .next()
            .map_err(|e| BulksetError::Query(format!("failed to fetch row: {}", e)))?
        {
            let mut values = Vec::with_capacity(column_names.len());
            for i in 0..column_names.len() {
                values.push(read_value(row, i)?);
            }
            rows.push(Row::new(column_names.clone(), values));
        }

        tracing::debug!(row_count = rows.len(), "query executed");
        let mut result = QueryResult::empty();
        result.columns = columns;
        result.rows = rows;
        result.execution_time_ms = started.elapsed().as_millis() as u64;
        Ok(result)
    }
}

#[async_trait]
impl Connection for SqliteConnection {
    fn driver_name(&self) -> &str {
        "sqlite"
    }

    #[tracing::instrument(skip(self))]
    async fn columns(&self, table: &str) -> Result<Vec<ColumnMeta>> {
        let result = self.run(&format!(
            "PRAGMA table_info({})",
            self.quote_table_name(table)
        ))?;
        Ok(result
            .rows
            .iter()
            .map(schema::column_from_table_info)
            .collect())
    }

    async fn execute(&self, sql: &str) -> Result<QueryResult> {
        tracing::trace!(sql_preview = %sql.chars().take(100).collect::<String>(), "executing");
        self.run(sql)
    }
}

/// Convert one rusqlite cell to our Value type
fn read_value(row: &rusqlite::Row<'_>, idx: usize) -> Result<Value> {
    use rusqlite::types::ValueRef;

    let value_ref = row
        .get_ref(idx)
        .map_err(|e| BulksetError::Query(e.to_string()))?;

    Ok(match value_ref {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Int64(i),
        ValueRef::Real(f) => Value::Float64(f),
        ValueRef::Text(s) => Value::String(String::from_utf8_lossy(s).to_string()),
        ValueRef::Blob(b) => Value::Bytes(b.to_vec()),
    })
}

#[cfg(test)]
mod tests;
