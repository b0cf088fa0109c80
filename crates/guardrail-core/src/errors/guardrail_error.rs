use super::{ClassifierError, StorageError};

/// Top-level error type for the Guardrail gatekeeper.
/// All subsystem errors convert into this via `From` impls.
#[derive(Debug, thiserror::Error)]
pub enum GuardrailError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("classifier error: {0}")]
    Classifier(#[from] ClassifierError),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Convenience type alias.
pub type GuardrailResult<T> = Result<T, GuardrailError>;
