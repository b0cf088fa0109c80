//! Keyword-heuristic mock classifier for tests and keyless operation.

use guardrail_core::errors::ClassifierError;
use guardrail_core::types::violation::Severity;

use super::{Classifier, ClassifierFinding, ClassifierInput};

/// Stands in when no real classifier is configured. Flags a couple of
/// obvious smells so the pipeline stays exercisable end to end.
#[derive(Debug, Default)]
pub struct MockClassifier;

impl Classifier for MockClassifier {
    async fn classify(
        &self,
        input: ClassifierInput,
    ) -> Result<Vec<ClassifierFinding>, ClassifierError> {
        let mut findings = Vec::new();
        if let Some(line) = line_containing(&input.content, "sleep(") {
            findings.push(ClassifierFinding {
                rule_id: "AI-PERF-01".to_string(),
                message:
                    "Avoid using sleep() in production code, consider async or event-driven approaches."
                        .to_string(),
                severity: Severity::Warning,
                line_number: line,
                suggestion: Some("await asyncio.sleep(1)".to_string()),
            });
        }
        Ok(findings)
    }
}

/// 1-based line of the first occurrence of `needle`, if any.
fn line_containing(content: &str, needle: &str) -> Option<u32> {
    content
        .split('\n')
        .position(|line| line.contains(needle))
        .map(|i| (i + 1) as u32)
}
