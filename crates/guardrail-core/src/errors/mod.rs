//! Error types, split per concern. Everything converts into
//! `GuardrailError` via `From` impls.

mod classifier_error;
mod guardrail_error;
mod storage_error;

pub use classifier_error::ClassifierError;
pub use guardrail_error::{GuardrailError, GuardrailResult};
pub use storage_error::StorageError;
