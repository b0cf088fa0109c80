//! The external semantic classifier, specified at its boundary only:
//! a capability with a result/failure contract. Implementations live
//! outside this workspace; tests and keyless operation use the mock.

mod mock;
mod retry;

use std::future::Future;

use serde::Deserialize;

use guardrail_core::errors::ClassifierError;
use guardrail_core::types::violation::{Category, Severity, Violation, ViolationSource};

pub use mock::MockClassifier;
pub use retry::Retrying;

/// Everything a classifier call gets to see for one file.
#[derive(Debug, Clone)]
pub struct ClassifierInput {
    pub filename: String,
    pub content: String,
    /// Static findings for the same file — classifier context.
    pub static_context: Vec<Violation>,
    /// Classifiers are asked to be stricter on AI-generated code.
    pub copilot_generated: bool,
}

/// One raw finding from the classifier. Lenient on optional fields;
/// validation happens when converting to `Violation`.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierFinding {
    #[serde(default = "default_rule_id")]
    pub rule_id: String,
    pub message: String,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default = "default_line")]
    pub line_number: u32,
    #[serde(default)]
    pub suggestion: Option<String>,
}

fn default_rule_id() -> String {
    "AI-GEN".to_string()
}

fn default_line() -> u32 {
    1
}

/// The classifier contract. Retry/backoff is the classifier side's own
/// concern (see `Retrying`); callers see only the final result.
pub trait Classifier: Send + Sync {
    fn classify(
        &self,
        input: ClassifierInput,
    ) -> impl Future<Output = Result<Vec<ClassifierFinding>, ClassifierError>> + Send;
}

/// Convert raw findings into tagged violations. Any finding that fails
/// validation poisons the whole batch as malformed output — no partial
/// entities escape.
pub fn findings_to_violations(
    filename: &str,
    findings: Vec<ClassifierFinding>,
) -> Result<Vec<Violation>, ClassifierError> {
    findings
        .into_iter()
        .map(|f| {
            Violation::new(
                ViolationSource::Classifier,
                f.rule_id,
                f.message,
                f.severity,
                Category::AiReview,
                filename,
                f.line_number,
                f.suggestion,
            )
            .map_err(|e| ClassifierError::Malformed(e.to_string()))
        })
        .collect()
}
