//! Error types for bulkset

use thiserror::Error;

/// Core error type for bulkset operations
#[derive(Error, Debug)]
pub enum BulksetError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for bulkset operations
pub type Result<T> = std::result::Result<T, BulksetError>;
