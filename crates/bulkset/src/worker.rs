//! The insert accumulator: row buffer, value resolver, query composer and
//! execution gateway in one component.
//!
//! A [`Worker`] binds a connection, a target table and an ordered column list
//! at construction, then accumulates rows until the configured batch size is
//! reached. Each flush composes a single multi-row INSERT in the dialect of
//! the underlying connection and hands it to the connection for execution.

use crate::row::BulkRow;
use bulkset_core::{BulksetError, ColumnMeta, Connection, Dialect, QueryResult, Result, Value};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// A resolved value waiting in the buffer
#[derive(Debug, Clone, PartialEq)]
pub enum PendingValue {
    /// A concrete value, quoted as-is at composition time
    Literal(Value),
    /// Placeholder for the single timestamp computed when the batch flushes;
    /// every placeholder in one statement resolves to the same instant
    FlushTimestamp,
}

/// One buffered row, exactly one resolved value per target column
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRow {
    values: Vec<PendingValue>,
}

impl PendingRow {
    /// The resolved values in target-column order
    pub fn values(&self) -> &[PendingValue] {
        &self.values
    }
}

/// Insert policy, fixed for the lifetime of a worker
#[derive(Debug, Clone)]
pub struct WorkerOptions {
    /// Number of buffered rows that triggers an automatic flush
    pub set_size: usize,
    /// Skip rows that would violate a uniqueness constraint instead of
    /// failing the statement, where the dialect supports it
    pub ignore: bool,
    /// Conflict-key columns for upsert-on-conflict; `None` disables it.
    /// MySQL ignores the key list since its syntax has no conflict target.
    pub update_duplicates: Option<Vec<String>>,
    /// Capture result sets from flushes so generated keys can be read back
    pub return_primary_keys: bool,
}

impl Default for WorkerOptions {
    fn default() -> Self {
        Self {
            set_size: 500,
            ignore: false,
            update_duplicates: None,
            return_primary_keys: false,
        }
    }
}

type BeforeSaveHook = Box<dyn FnMut(&[PendingRow]) + Send>;
type AfterSaveHook = Box<dyn FnMut() + Send>;

/// Row-batching insert accumulator bound to one connection and one table
pub struct Worker {
    connection: Arc<dyn Connection>,
    table_name: String,
    primary_key: String,
    columns: Vec<ColumnMeta>,
    column_list: String,
    dialect: Dialect,
    options: WorkerOptions,
    before_save: Option<BeforeSaveHook>,
    after_save: Option<AfterSaveHook>,
    result_sets: Vec<QueryResult>,
    set: Vec<PendingRow>,
}

impl Worker {
    /// Build a worker for `table_name`, inserting the given columns.
    ///
    /// Column metadata is introspected once through the connection and kept
    /// as an immutable snapshot. Requesting a column the table does not have
    /// is a configuration error and fails here rather than at flush time.
    pub async fn new(
        connection: Arc<dyn Connection>,
        table_name: &str,
        primary_key: &str,
        column_names: &[&str],
        options: WorkerOptions,
    ) -> Result<Self> {
        let table_columns = connection.columns(table_name).await?;

        let mut columns = Vec::with_capacity(column_names.len());
        for name in column_names {
            let column = table_columns
                .iter()
                .find(|c| c.name == *name)
                .cloned()
                .ok_or_else(|| {
                    BulksetError::Schema(format!(
                        "column '{}' does not exist on table '{}'",
                        name, table_name
                    ))
                })?;
            columns.push(column);
        }

        let column_list = column_names
            .iter()
            .map(|name| connection.quote_column_name(name))
            .collect::<Vec<_>>()
            .join(",");
        let dialect = connection.dialect();
        let table = connection.quote_table_name(table_name);

        tracing::debug!(
            table = %table,
            dialect = %dialect.display_name(),
            columns = columns.len(),
            set_size = options.set_size,
            "bulk insert worker initialized"
        );

        Ok(Self {
            connection,
            table_name: table,
            primary_key: primary_key.to_string(),
            columns,
            column_list,
            dialect,
            options,
            before_save: None,
            after_save: None,
            result_sets: Vec::new(),
            set: Vec::new(),
        })
    }

    /// Whether any rows are buffered
    pub fn pending(&self) -> bool {
        !self.set.is_empty()
    }

    /// Number of buffered rows
    pub fn pending_count(&self) -> usize {
        self.set.len()
    }

    /// The dialect statements are composed for
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Result sets captured from flushes, in flush order. Only populated
    /// when `return_primary_keys` is enabled.
    pub fn result_sets(&self) -> &[QueryResult] {
        &self.result_sets
    }

    /// Register a hook invoked with the buffered rows before each flush
    pub fn before_save<F>(&mut self, hook: F)
    where
        F: FnMut(&[PendingRow]) + Send + 'static,
    {
        self.before_save = Some(Box::new(hook));
    }

    /// Register a hook invoked after each successful flush
    pub fn after_save<F>(&mut self, hook: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.after_save = Some(Box::new(hook));
    }

    /// Buffer one row, flushing first if the buffer is already at capacity
    pub async fn add(&mut self, row: impl Into<BulkRow>) -> Result<&mut Self> {
        if self.set.len() >= self.options.set_size {
            self.flush().await?;
        }
        let resolved = self.resolve(row.into());
        self.set.push(resolved);
        Ok(self)
    }

    /// Buffer each row in order; flush boundaries fall wherever `add` puts them
    pub async fn add_all<I, R>(&mut self, rows: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = R>,
        R: Into<BulkRow>,
    {
        for row in rows {
            self.add(row).await?;
        }
        Ok(self)
    }

    /// Compose and execute one INSERT for everything buffered, then clear.
    ///
    /// A no-op when nothing is buffered. An execution error propagates with
    /// the buffer intact, so a caller can retry the flush or inspect the
    /// rows that failed.
    pub async fn flush(&mut self) -> Result<&mut Self> {
        if self.set.is_empty() {
            return Ok(self);
        }
        if let Some(hook) = self.before_save.as_mut() {
            hook(&self.set);
        }
        self.execute_pending().await?;
        if let Some(hook) = self.after_save.as_mut() {
            hook();
        }
        self.set.clear();
        Ok(self)
    }

    async fn execute_pending(&mut self) -> Result<()> {
        let Some(sql) = self.compose(Utc::now()) else {
            return Ok(());
        };
        tracing::debug!(
            table = %self.table_name,
            rows = self.set.len(),
            "flushing insert batch"
        );
        tracing::trace!(sql = %sql);
        let result = self.connection.execute(&sql).await?;
        if self.options.return_primary_keys {
            self.result_sets.push(result);
        }
        Ok(())
    }

    /// Map one incoming row onto the target columns.
    ///
    /// Resolution order per column: explicit value (by name or position),
    /// then the declared default, then the shared-timestamp placeholder for
    /// `created_at`/`updated_at`, then NULL. The order is fixed; a default
    /// on an audit column wins over the timestamp.
    fn resolve(&self, row: BulkRow) -> PendingRow {
        let values = self
            .columns
            .iter()
            .enumerate()
            .map(|(index, column)| {
                if let Some(value) = row.value_for(&column.name, index) {
                    return PendingValue::Literal(value.clone());
                }
                if let Some(default) = column.declared_default() {
                    return PendingValue::Literal(default);
                }
                if column.name == "created_at" || column.name == "updated_at" {
                    return PendingValue::FlushTimestamp;
                }
                PendingValue::Literal(Value::Null)
            })
            .collect();
        PendingRow { values }
    }

    /// Compose the INSERT statement for the currently buffered rows.
    ///
    /// `now` substitutes every timestamp placeholder in the batch, so all
    /// auto-filled audit columns in one statement share a single instant.
    /// Returns `None` when nothing is buffered — there is no empty INSERT.
    pub fn compose(&self, now: DateTime<Utc>) -> Option<String> {
        if self.set.is_empty() {
            return None;
        }
        let now = Value::DateTimeUtc(now);

        let mut sql = format!(
            "INSERT {} INTO {} ({}) VALUES ",
            self.insert_ignore(),
            self.table_name,
            self.column_list
        );

        let tuples: Vec<String> = self
            .set
            .iter()
            .map(|row| {
                let rendered: Vec<String> = row
                    .values
                    .iter()
                    .map(|value| match value {
                        PendingValue::Literal(value) => self.connection.quote(value),
                        PendingValue::FlushTimestamp => self.connection.quote(&now),
                    })
                    .collect();
                format!("({})", rendered.join(","))
            })
            .collect();
        sql.push_str(&tuples.join(","));

        sql.push_str(&self.on_conflict_clause());
        sql.push_str(&self.returning_clause());
        Some(sql)
    }

    fn insert_ignore(&self) -> &'static str {
        if !self.options.ignore {
            return "";
        }
        match self.dialect {
            Dialect::MySql => "IGNORE",
            Dialect::Sqlite => "OR IGNORE",
            // PostgreSQL spells ignore as ON CONFLICT DO NOTHING; anything
            // unrecognized degrades to a plain insert
            Dialect::PostgreSql | Dialect::Other => "",
        }
    }

    fn on_conflict_clause(&self) -> String {
        match self.dialect {
            Dialect::PostgreSql if self.options.ignore => " ON CONFLICT DO NOTHING".to_string(),
            Dialect::PostgreSql => match &self.options.update_duplicates {
                Some(keys) if !keys.is_empty() => {
                    let assignments = self
                        .columns
                        .iter()
                        .filter(|column| column.name != "created_at")
                        .map(|column| format!("{}=EXCLUDED.{}", column.name, column.name))
                        .collect::<Vec<_>>()
                        .join(", ");
                    format!(
                        " ON CONFLICT({}) DO UPDATE SET {}",
                        keys.join(", "),
                        assignments
                    )
                }
                _ => String::new(),
            },
            Dialect::MySql => match &self.options.update_duplicates {
                Some(keys) if !keys.is_empty() => {
                    let assignments = self
                        .columns
                        .iter()
                        .map(|column| format!("`{0}`=VALUES(`{0}`)", column.name))
                        .collect::<Vec<_>>()
                        .join(", ");
                    format!(" ON DUPLICATE KEY UPDATE {}", assignments)
                }
                _ => String::new(),
            },
            Dialect::Sqlite | Dialect::Other => String::new(),
        }
    }

    fn returning_clause(&self) -> String {
        match self.dialect {
            Dialect::PostgreSql if self.options.return_primary_keys => {
                format!(" RETURNING {}", self.primary_key)
            }
            _ => String::new(),
        }
    }
}
