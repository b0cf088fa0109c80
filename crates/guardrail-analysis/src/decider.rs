//! Enforcement decider — converts the violation set plus enforcement
//! mode into a pass/fail verdict and summary.

use guardrail_core::types::rules::EnforcementMode;
use guardrail_core::types::violation::{Severity, Violation};

/// Severities that can fail a request in blocking mode.
/// Deliberately just `Blocking` — see `Severity` docs for the
/// CRITICAL/HIGH mapping.
const BLOCKING_SEVERITIES: [Severity; 1] = [Severity::Blocking];

/// The pass/fail outcome for one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub succeeded: bool,
    pub summary: String,
    pub enforcement_mode: EnforcementMode,
}

/// Decide the verdict. Reads `enforcement_mode` independently from the
/// same override text the rule engine saw; absence or parse failure
/// defaults to blocking.
pub fn decide(violations: &[Violation], override_text: Option<&str>) -> Verdict {
    let enforcement_mode = EnforcementMode::from_override(override_text);

    let has_blocking = violations
        .iter()
        .any(|v| BLOCKING_SEVERITIES.contains(&v.severity));

    match enforcement_mode {
        EnforcementMode::Advisory => Verdict {
            succeeded: true,
            summary: format!("[ADVISORY] Found {} violations.", violations.len()),
            enforcement_mode,
        },
        EnforcementMode::Blocking => Verdict {
            succeeded: !has_blocking,
            summary: format!("Found {} violations.", violations.len()),
            enforcement_mode,
        },
    }
}
