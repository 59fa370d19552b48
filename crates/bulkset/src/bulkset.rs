//! Dialect-aware bulk INSERT accumulator
//!
//! Callers push individual rows into a [`Worker`]; the worker buffers them
//! and periodically emits one multi-row INSERT against the connection it was
//! built with, handling per-dialect conflict, ignore and key-return syntax.

mod row;
mod worker;

pub use row::BulkRow;
pub use worker::{PendingRow, PendingValue, Worker, WorkerOptions};

pub use bulkset_core::{BulksetError, Connection, Dialect, Result, Value};
