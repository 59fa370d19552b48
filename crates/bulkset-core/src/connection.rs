//! Connection trait — the collaborator contract the accumulator drives
//!
//! The accumulator needs five capabilities from a connection: identify its
//! dialect, list column metadata for a table, quote identifiers, quote scalar
//! values for literal embedding, and execute raw SQL text. Everything else
//! (pooling, transactions, cancellation) stays the driver's business.

use crate::{ColumnMeta, Dialect, QueryResult, Result, Value};
use async_trait::async_trait;

/// A database connection
#[async_trait]
pub trait Connection: Send + Sync {
    /// Get the driver name (e.g., "sqlite", "postgresql", "mysql")
    fn driver_name(&self) -> &str;

    /// Get the dialect for this connection, derived from the driver name
    fn dialect(&self) -> Dialect {
        Dialect::from_driver_name(self.driver_name())
    }

    /// List column metadata for a table
    async fn columns(&self, table: &str) -> Result<Vec<ColumnMeta>>;

    /// Quote a table identifier
    fn quote_table_name(&self, name: &str) -> String {
        self.dialect().quote_identifier(name)
    }

    /// Quote a column identifier
    fn quote_column_name(&self, name: &str) -> String {
        self.dialect().quote_identifier(name)
    }

    /// Quote and type-cast a scalar value for literal embedding in SQL text
    fn quote(&self, value: &Value) -> String {
        self.dialect().quote_value(value)
    }

    /// Execute raw SQL text and return the resulting rows, if any
    async fn execute(&self, sql: &str) -> Result<QueryResult>;
}
