//! # guardrail-storage
//!
//! SQLite persistence layer for the Guardrail audit/override ledger.
//! WAL mode for multi-process writers, append-only tables, windowed
//! stats aggregation.

pub mod connection;
pub mod engine;
pub mod migrations;
pub mod queries;
pub mod stats;

pub use connection::Database;
pub use engine::GuardrailStore;

use guardrail_core::errors::StorageError;

/// Wrap any error-ish value as a storage error.
pub fn to_storage_err(e: impl ToString) -> StorageError {
    StorageError::sqlite(e.to_string())
}
