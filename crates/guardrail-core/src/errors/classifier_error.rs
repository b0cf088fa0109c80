//! Errors from the external semantic classifier collaborator.
//!
//! The classifier owns its own retry budget; `Exhausted` is what the
//! orchestrator sees after that budget is spent.

/// Failure modes of a classifier call.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("classifier call timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("classifier returned status {code}")]
    Status { code: u16 },

    #[error("unparseable classifier output: {0}")]
    Malformed(String),

    #[error("classifier transport error: {0}")]
    Transport(String),

    #[error("classifier budget exhausted after {attempts} attempts: {last}")]
    Exhausted {
        attempts: u32,
        #[source]
        last: Box<ClassifierError>,
    },
}
