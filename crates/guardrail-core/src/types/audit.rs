//! Audit ledger records. Append-only: entries are never mutated or
//! deleted once written.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::violation::Violation;

/// Distinct event types in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditEventType {
    ScanCompleted,
    OverrideIssued,
}

impl AuditEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ScanCompleted => "SCAN_COMPLETED",
            Self::OverrideIssued => "OVERRIDE_ISSUED",
        }
    }
}

/// One ledger event. `violations_count == violations.len()` holds by
/// construction — both constructors derive the count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub event_type: AuditEventType,
    pub repo: String,
    pub pr_number: Option<u64>,
    pub commit_sha: String,
    pub status: String,
    pub violations_count: usize,
    pub violations: Vec<Violation>,
    pub metadata: serde_json::Value,
}

impl AuditEntry {
    /// A completed scan, recorded with its pre-override ground truth.
    pub fn scan_completed(
        repo: impl Into<String>,
        pr_number: Option<u64>,
        commit_sha: impl Into<String>,
        status: impl Into<String>,
        violations: Vec<Violation>,
        metadata: serde_json::Value,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            event_type: AuditEventType::ScanCompleted,
            repo: repo.into(),
            pr_number,
            commit_sha: commit_sha.into(),
            status: status.into(),
            violations_count: violations.len(),
            violations,
            metadata,
        }
    }

    /// The override act itself — a separate, distinctly-typed event so
    /// the ledger reconstructs to ground truth plus the admin action.
    pub fn override_issued(
        repo: impl Into<String>,
        commit_sha: impl Into<String>,
        metadata: serde_json::Value,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            event_type: AuditEventType::OverrideIssued,
            repo: repo.into(),
            pr_number: None,
            commit_sha: commit_sha.into(),
            status: "overridden".into(),
            violations_count: 0,
            violations: Vec::new(),
            metadata,
        }
    }
}

/// An administrator override for one exact (repo, commit_sha) pair.
/// Existence of at least one record is sufficient and permanent;
/// repeated overrides for the same pair are harmless duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverrideRecord {
    pub timestamp: DateTime<Utc>,
    pub repo: String,
    pub commit_sha: String,
    pub admin_user: String,
    pub reason: String,
}

impl OverrideRecord {
    pub fn new(
        repo: impl Into<String>,
        commit_sha: impl Into<String>,
        admin_user: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            repo: repo.into(),
            commit_sha: commit_sha.into(),
            admin_user: admin_user.into(),
            reason: reason.into(),
        }
    }
}
