//! Audit ledger insert and scan-back queries.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use guardrail_core::errors::StorageError;
use guardrail_core::types::audit::{AuditEntry, AuditEventType};
use guardrail_core::types::violation::Violation;

use crate::to_storage_err;

/// Append one ledger event. Violations and metadata are stored as JSON
/// columns for flexibility; the typed columns carry everything the
/// aggregation layer filters on.
pub fn insert_audit_entry(conn: &Connection, entry: &AuditEntry) -> Result<(), StorageError> {
    let violations_json = serde_json::to_string(&entry.violations)
        .map_err(|e| StorageError::Serialization {
            message: e.to_string(),
        })?;
    let metadata_json = entry.metadata.to_string();

    conn.execute(
        "INSERT INTO audit_log (timestamp, event_type, repo, pr_number, commit_sha,
                                status, violations_count, violations_json, metadata_json)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            entry.timestamp.to_rfc3339(),
            entry.event_type.as_str(),
            entry.repo,
            entry.pr_number,
            entry.commit_sha,
            entry.status,
            entry.violations_count as i64,
            violations_json,
            metadata_json,
        ],
    )
    .map_err(to_storage_err)?;
    Ok(())
}

/// Most recent entries, newest first (by insertion order). `limit` is
/// the optional bounded row scan for stats queries.
pub fn recent_entries(
    conn: &Connection,
    limit: Option<usize>,
) -> Result<Vec<AuditEntry>, StorageError> {
    let sql = match limit {
        Some(_) => {
            "SELECT timestamp, event_type, repo, pr_number, commit_sha,
                    status, violations_count, violations_json, metadata_json
             FROM audit_log ORDER BY id DESC LIMIT ?1"
        }
        None => {
            "SELECT timestamp, event_type, repo, pr_number, commit_sha,
                    status, violations_count, violations_json, metadata_json
             FROM audit_log ORDER BY id DESC"
        }
    };
    let mut stmt = conn.prepare(sql).map_err(to_storage_err)?;

    let map_row = |row: &rusqlite::Row<'_>| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, Option<u64>>(3)?,
            row.get::<_, String>(4)?,
            row.get::<_, String>(5)?,
            row.get::<_, i64>(6)?,
            row.get::<_, String>(7)?,
            row.get::<_, String>(8)?,
        ))
    };

    let rows: Vec<_> = match limit {
        Some(n) => stmt
            .query_map(params![n as i64], map_row)
            .map_err(to_storage_err)?
            .collect::<Result<_, _>>()
            .map_err(to_storage_err)?,
        None => stmt
            .query_map([], map_row)
            .map_err(to_storage_err)?
            .collect::<Result<_, _>>()
            .map_err(to_storage_err)?,
    };

    let mut entries = Vec::with_capacity(rows.len());
    for (ts, event_type, repo, pr_number, commit_sha, status, count, violations_json, metadata_json) in
        rows
    {
        entries.push(row_to_entry(
            ts,
            event_type,
            repo,
            pr_number,
            commit_sha,
            status,
            count,
            violations_json,
            metadata_json,
        ));
    }
    Ok(entries)
}

/// Decode one row. Degraded columns never drop the entry: a bad
/// timestamp falls back to "now" (fail-open for windowed queries), bad
/// JSON falls back to empty.
#[allow(clippy::too_many_arguments)]
fn row_to_entry(
    ts: String,
    event_type: String,
    repo: String,
    pr_number: Option<u64>,
    commit_sha: String,
    status: String,
    count: i64,
    violations_json: String,
    metadata_json: String,
) -> AuditEntry {
    let timestamp = DateTime::parse_from_rfc3339(&ts)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now());
    let event_type = match event_type.as_str() {
        "OVERRIDE_ISSUED" => AuditEventType::OverrideIssued,
        _ => AuditEventType::ScanCompleted,
    };
    let violations: Vec<Violation> =
        serde_json::from_str(&violations_json).unwrap_or_default();
    let metadata: serde_json::Value = serde_json::from_str(&metadata_json)
        .unwrap_or(serde_json::Value::Object(serde_json::Map::new()));

    AuditEntry {
        timestamp,
        event_type,
        repo,
        pr_number,
        commit_sha,
        status,
        violations_count: count.max(0) as usize,
        violations,
        metadata,
    }
}
