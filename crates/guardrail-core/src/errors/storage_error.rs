//! Storage-layer errors for SQLite operations.

/// Errors that can occur in the storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    Sqlite { message: String },

    #[error("migration failed: {message}")]
    MigrationFailed { message: String },

    #[error("serialization error: {message}")]
    Serialization { message: String },
}

impl StorageError {
    /// Wrap any error-ish value as a generic SQLite error.
    pub fn sqlite(e: impl ToString) -> Self {
        Self::Sqlite {
            message: e.to_string(),
        }
    }
}
