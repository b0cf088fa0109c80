//! Scan request/response boundary types.

use serde::{Deserialize, Serialize};

use super::rules::EnforcementMode;
use super::violation::Violation;

/// One changed file of a commit/PR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanFile {
    pub filename: String,
    pub content: String,
}

/// A request to evaluate the changed files of one commit/PR.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanRequest {
    pub repo_full_name: String,
    #[serde(default)]
    pub pr_number: Option<u64>,
    pub commit_sha: String,
    /// Ordered — response violations follow this order.
    pub files: Vec<ScanFile>,
    /// Repository-level override configuration (YAML text).
    #[serde(default)]
    pub config_override: Option<String>,
    /// Whether the commit/PR was flagged as Copilot-generated.
    #[serde(default)]
    pub is_copilot_generated: bool,
}

/// Outcome status of a scan call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    Success,
    Error,
}

impl ScanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// The derived response returned to the caller. Not the persisted form —
/// the audit ledger records the pre-override verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResponse {
    pub status: ScanStatus,
    pub violations: Vec<Violation>,
    /// True if no blocking violations (or mode is advisory, or an
    /// admin override exists for this repo/commit).
    pub succeeded: bool,
    pub summary: String,
    pub enforcement_mode: EnforcementMode,
}

impl ScanResponse {
    /// Generic error response for the orchestration boundary — carries a
    /// message, never a raw internal trace.
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self {
            status: ScanStatus::Error,
            violations: Vec::new(),
            succeeded: false,
            summary: message.into(),
            enforcement_mode: EnforcementMode::Blocking,
        }
    }
}
