//! Caller-facing row shapes
//!
//! A row handed to the worker is either keyed by column name or positional
//! in the worker's column order. Both shapes funnel into one resolved
//! representation at the resolver boundary; after that the buffer only ever
//! holds uniform rows.

use bulkset_core::Value;
use indexmap::IndexMap;

/// A single row of values to insert
#[derive(Debug, Clone, PartialEq)]
pub enum BulkRow {
    /// Column name → value mapping; omitted columns fall back to defaults
    Keyed(IndexMap<String, Value>),
    /// Values positioned by the worker's column order; a short row leaves
    /// the tail columns to default resolution
    Positional(Vec<Value>),
}

impl BulkRow {
    /// Build a keyed row from (column, value) pairs
    pub fn keyed<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        BulkRow::Keyed(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build a positional row from values in column order
    pub fn positional<V, I>(values: I) -> Self
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        BulkRow::Positional(values.into_iter().map(Into::into).collect())
    }

    /// Look up the explicit value for a column, by name for keyed rows and
    /// by index for positional rows. `None` means the caller omitted the
    /// column; an explicit NULL is still `Some`.
    pub(crate) fn value_for(&self, name: &str, index: usize) -> Option<&Value> {
        match self {
            BulkRow::Keyed(map) => map.get(name),
            BulkRow::Positional(values) => values.get(index),
        }
    }
}

impl From<Vec<Value>> for BulkRow {
    fn from(values: Vec<Value>) -> Self {
        BulkRow::Positional(values)
    }
}

impl<const N: usize> From<[Value; N]> for BulkRow {
    fn from(values: [Value; N]) -> Self {
        BulkRow::Positional(values.into())
    }
}

impl From<IndexMap<String, Value>> for BulkRow {
    fn from(map: IndexMap<String, Value>) -> Self {
        BulkRow::Keyed(map)
    }
}

#[cfg(test)]
mod tests;
