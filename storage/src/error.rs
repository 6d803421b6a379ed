//! Storage error types.
//!
//! Used by the entry store and callers of storage APIs.

use thiserror::Error;

/// Errors that can occur when using storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Insert of an existing key; nothing was changed.
    #[error("\"{0}\" entry already exists")]
    DuplicateKey(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid table name: {0}")]
    InvalidTable(String),
}
