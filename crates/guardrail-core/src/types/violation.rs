//! Violation value type and its discriminants.
//!
//! Violations come from four producers (rule engine, license check,
//! classifier, system failure) and all pass through the single validating
//! constructor `Violation::new`, so a malformed classifier finding can
//! never yield a partially-initialized entity.

use serde::{Deserialize, Serialize};

use crate::errors::GuardrailError;

/// Severity of a violation.
///
/// The blocking-severity set is exactly `{Blocking}`. CRITICAL/HIGH levels
/// seen in some classifier outputs are mapped to `Warning` on ingestion;
/// widening the blocking set is a deliberate future extension, not a
/// silent behavior change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", from = "String")]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Blocking,
}

impl From<String> for Severity {
    fn from(s: String) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "INFO" => Self::Info,
            "BLOCKING" => Self::Blocking,
            // Unknown levels (including CRITICAL/HIGH) land on Warning:
            // visible in reports, never able to fail a request.
            _ => Self::Warning,
        }
    }
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Blocking => "BLOCKING",
        }
    }
}

/// Category of a violation. The set is open-ended at the wire level;
/// unrecognized categories deserialize to `Unknown` rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", from = "String")]
pub enum Category {
    Security,
    Style,
    Compliance,
    System,
    AiReview,
    Unknown,
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "SECURITY" => Self::Security,
            "STYLE" => Self::Style,
            "COMPLIANCE" => Self::Compliance,
            "SYSTEM" => Self::System,
            "AI_REVIEW" => Self::AiReview,
            _ => Self::Unknown,
        }
    }
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Security => "SECURITY",
            Self::Style => "STYLE",
            Self::Compliance => "COMPLIANCE",
            Self::System => "SYSTEM",
            Self::AiReview => "AI_REVIEW",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// Which producer emitted a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationSource {
    RuleEngine,
    LicenseCheck,
    Classifier,
    SystemFailure,
}

/// One finding against one line of one file. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub rule_id: String,
    pub message: String,
    pub severity: Severity,
    pub category: Category,
    pub file_path: String,
    /// 1-based physical line.
    pub line_number: u32,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub suggestion: Option<String>,
    pub source: ViolationSource,
}

impl Violation {
    /// Validating constructor — the only way to build a violation.
    ///
    /// Rejects empty rule ids, empty file paths, and line 0.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        source: ViolationSource,
        rule_id: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
        category: Category,
        file_path: impl Into<String>,
        line_number: u32,
        suggestion: Option<String>,
    ) -> Result<Self, GuardrailError> {
        let rule_id = rule_id.into();
        let file_path = file_path.into();
        if rule_id.is_empty() {
            return Err(GuardrailError::Validation("empty rule_id".into()));
        }
        if file_path.is_empty() {
            return Err(GuardrailError::Validation("empty file_path".into()));
        }
        if line_number == 0 {
            return Err(GuardrailError::Validation(
                "line_number must be 1-based".into(),
            ));
        }
        Ok(Self {
            rule_id,
            message: message.into(),
            severity,
            category,
            file_path,
            line_number,
            suggestion,
            source,
        })
    }
}
