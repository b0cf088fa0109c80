//! Override store queries. Existence of any record for the exact
//! (repo, commit_sha) pair defines "overridden" — permanently.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use guardrail_core::errors::StorageError;
use guardrail_core::types::audit::OverrideRecord;

use crate::to_storage_err;

/// Durable append. Repeated overrides for the same pair are harmless
/// duplicates, so no uniqueness constraint.
pub fn insert_override(conn: &Connection, record: &OverrideRecord) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO overrides (timestamp, repo, commit_sha, admin_user, reason)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            record.timestamp.to_rfc3339(),
            record.repo,
            record.commit_sha,
            record.admin_user,
            record.reason,
        ],
    )
    .map_err(to_storage_err)?;
    Ok(())
}

/// True iff at least one record exists for the exact pair.
pub fn is_overridden(
    conn: &Connection,
    repo: &str,
    commit_sha: &str,
) -> Result<bool, StorageError> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM overrides WHERE repo = ?1 AND commit_sha = ?2)",
        params![repo, commit_sha],
        |row| row.get::<_, bool>(0),
    )
    .map_err(to_storage_err)
}

/// All override records for a pair, newest first.
pub fn overrides_for(
    conn: &Connection,
    repo: &str,
    commit_sha: &str,
) -> Result<Vec<OverrideRecord>, StorageError> {
    let mut stmt = conn
        .prepare(
            "SELECT timestamp, repo, commit_sha, admin_user, reason
             FROM overrides WHERE repo = ?1 AND commit_sha = ?2
             ORDER BY id DESC",
        )
        .map_err(to_storage_err)?;

    let rows = stmt
        .query_map(params![repo, commit_sha], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })
        .map_err(to_storage_err)?;

    let mut records = Vec::new();
    for row in rows {
        let (ts, repo, commit_sha, admin_user, reason) = row.map_err(to_storage_err)?;
        let timestamp = DateTime::parse_from_rfc3339(&ts)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now());
        records.push(OverrideRecord {
            timestamp,
            repo,
            commit_sha,
            admin_user,
            reason,
        });
    }
    Ok(records)
}
