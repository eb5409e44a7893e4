//! Local storage module for the coil warehouse
//!
//! Provides SQLite-based persistence for the coils table. The database
//! handle is passed into each operation explicitly; there is no
//! module-level session state.

mod database;
mod error;
mod repository;

pub use database::Database;
pub use error::StorageError;
