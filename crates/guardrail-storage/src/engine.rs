//! `GuardrailStore` — unified engine over the audit ledger and the
//! override store. Single owner of the database handle; no code outside
//! this crate touches a raw `&Connection`.

use std::path::Path;

use chrono::{Duration, Utc};

use guardrail_core::errors::StorageError;
use guardrail_core::types::audit::{AuditEntry, OverrideRecord};
use guardrail_core::types::stats::AuditStats;

use crate::connection::Database;
use crate::queries::{audit_ops, override_ops};
use crate::stats;

/// The persisted audit/override ledger and its aggregation layer.
pub struct GuardrailStore {
    db: Database,
    /// Optional bounded row scan for stats queries. `None` aggregates
    /// the full filtered window. When set, very long histories trade
    /// exactness for bounded query latency — an explicit approximation.
    stats_row_limit: Option<usize>,
}

impl GuardrailStore {
    /// Open a file-backed store. Runs migrations and applies pragmas.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        Ok(Self {
            db: Database::open(path)?,
            stats_row_limit: None,
        })
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        Ok(Self {
            db: Database::open_in_memory()?,
            stats_row_limit: None,
        })
    }

    pub fn with_stats_row_limit(mut self, limit: Option<usize>) -> Self {
        self.stats_row_limit = limit;
        self
    }

    /// Append one ledger event. The caller decides what to do on
    /// failure — for scans, persistence is best-effort relative to the
    /// already-computed response.
    pub async fn append_entry(&self, entry: &AuditEntry) -> Result<(), StorageError> {
        self.db
            .with_conn(|conn| audit_ops::insert_audit_entry(conn, entry))
            .await
    }

    /// Record an administrator override.
    pub async fn record_override(&self, record: &OverrideRecord) -> Result<(), StorageError> {
        self.db
            .with_conn(|conn| override_ops::insert_override(conn, record))
            .await
    }

    /// Whether any override exists for the exact (repo, commit) pair.
    pub async fn is_overridden(
        &self,
        repo: &str,
        commit_sha: &str,
    ) -> Result<bool, StorageError> {
        self.db
            .with_conn(|conn| override_ops::is_overridden(conn, repo, commit_sha))
            .await
    }

    /// All override records for a pair, newest first.
    pub async fn overrides_for(
        &self,
        repo: &str,
        commit_sha: &str,
    ) -> Result<Vec<OverrideRecord>, StorageError> {
        self.db
            .with_conn(|conn| override_ops::overrides_for(conn, repo, commit_sha))
            .await
    }

    /// Most recent ledger entries, newest first.
    pub async fn recent_entries(
        &self,
        limit: Option<usize>,
    ) -> Result<Vec<AuditEntry>, StorageError> {
        self.db
            .with_conn(|conn| audit_ops::recent_entries(conn, limit))
            .await
    }

    /// Windowed aggregate query. `days = -1` means unbounded, else a
    /// rolling window back from now.
    pub async fn query_stats(&self, days: i64) -> Result<AuditStats, StorageError> {
        let cutoff = if days < 0 {
            None
        } else {
            Some(Utc::now() - Duration::days(days))
        };
        let entries = self.recent_entries(self.stats_row_limit).await?;
        Ok(stats::aggregate(&entries, cutoff))
    }
}
