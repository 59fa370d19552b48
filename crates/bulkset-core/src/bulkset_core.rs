//! Core types and collaborator contracts for bulkset
//!
//! This crate defines the vocabulary shared by the insert accumulator and the
//! database drivers: SQL values, result rows, column metadata, the closed set
//! of supported dialects with their quoting rules, and the narrow
//! [`Connection`] contract a driver has to satisfy.

mod connection;
mod dialect;
mod error;
mod types;

pub use connection::Connection;
pub use dialect::Dialect;
pub use error::{BulksetError, Result};
pub use types::{ColumnMeta, QueryResult, Row, Value};
