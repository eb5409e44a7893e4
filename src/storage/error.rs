//! Storage module error types
//!
//! Provides error types for database operations.

use thiserror::Error;

/// Storage operation error type
#[derive(Error, Debug)]
pub enum StorageError {
    /// Database connection or query error
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Lock error when accessing database
    #[error("database lock poisoned")]
    LockError,
}
