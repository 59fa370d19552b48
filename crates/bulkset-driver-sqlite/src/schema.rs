//! Column metadata from SQLite's PRAGMA interface

use bulkset_core::{ColumnMeta, Row};

/// Build column metadata from one `PRAGMA table_info` row:
/// `(cid, name, type, notnull, dflt_value, pk)`. The default value is kept
/// as the literal expression text SQLite reports (`'pending'`, `0`, ...).
pub(crate) fn column_from_table_info(row: &Row) -> ColumnMeta {
    ColumnMeta {
        name: row
            .get(1)
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string(),
        data_type: row
            .get(2)
            .and_then(|v| v.as_str())
            .unwrap_or("TEXT")
            .to_string(),
        nullable: row.get(3).and_then(|v| v.as_i64()).unwrap_or(0) == 0,
        ordinal: row.get(0).and_then(|v| v.as_i64()).unwrap_or(0) as usize,
        default_value: row.get(4).and_then(|v| {
            if v.is_null() {
                None
            } else {
                Some(v.to_string())
            }
        }),
    }
}

#[cfg(test)]
mod tests;
