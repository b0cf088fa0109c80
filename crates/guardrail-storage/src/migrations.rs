//! Schema setup. Both tables are append-only — no UPDATE or DELETE
//! statements exist anywhere in this crate.

use rusqlite::Connection;

use guardrail_core::errors::StorageError;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS audit_log (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    timestamp TEXT NOT NULL,
    event_type TEXT NOT NULL,
    repo TEXT NOT NULL,
    pr_number INTEGER,
    commit_sha TEXT NOT NULL,
    status TEXT NOT NULL,
    violations_count INTEGER NOT NULL,
    violations_json TEXT NOT NULL,
    metadata_json TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_audit_log_repo_ts ON audit_log (repo, timestamp);

CREATE TABLE IF NOT EXISTS overrides (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    timestamp TEXT NOT NULL,
    repo TEXT NOT NULL,
    commit_sha TEXT NOT NULL,
    admin_user TEXT NOT NULL,
    reason TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_overrides_pair ON overrides (repo, commit_sha);
";

/// Create tables and indices. Idempotent.
pub fn run_migrations(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(SCHEMA)
        .map_err(|e| StorageError::MigrationFailed {
            message: e.to_string(),
        })
}
