//! Pure aggregation over ledger entries. Reads only — the ledger is
//! the sole source of truth and is never mutated here.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use guardrail_core::types::audit::{AuditEntry, AuditEventType};
use guardrail_core::types::stats::{
    AuditStats, RECENT_VIOLATIONS_LIMIT, TOP_RISKY_FILES_LIMIT,
};
use guardrail_core::types::violation::Violation;

/// Aggregate entries into windowed stats.
///
/// `entries` must be ordered newest-first (the query layer's order).
/// `cutoff` of `None` means unbounded; otherwise entries with
/// `timestamp < cutoff` are excluded. Timestamps that failed to parse
/// were already replaced with "now" at read time, so they stay in any
/// window (fail-open).
pub fn aggregate(entries: &[AuditEntry], cutoff: Option<DateTime<Utc>>) -> AuditStats {
    let in_window = entries
        .iter()
        .filter(|e| cutoff.map_or(true, |c| e.timestamp >= c));

    let mut stats = AuditStats::default();
    let mut file_counts: HashMap<String, (u64, usize)> = HashMap::new(); // count, first-seen
    let mut recent: Vec<(DateTime<Utc>, Violation)> = Vec::new();
    let mut seen_files = 0usize;

    for entry in in_window {
        if entry.event_type == AuditEventType::ScanCompleted {
            stats.scan_count += 1;
        }
        for violation in &entry.violations {
            *stats
                .category_histogram
                .entry(violation.category.as_str().to_string())
                .or_insert(0) += 1;
            *stats
                .severity_histogram
                .entry(violation.severity.as_str().to_string())
                .or_insert(0) += 1;

            let slot = file_counts
                .entry(violation.file_path.clone())
                .or_insert_with(|| {
                    seen_files += 1;
                    (0, seen_files)
                });
            slot.0 += 1;

            recent.push((entry.timestamp, violation.clone()));
        }
    }

    // Ranked risky files: count descending, ties by first-seen order
    // walking the ledger newest-first.
    let mut ranked: Vec<(String, u64, usize)> = file_counts
        .into_iter()
        .map(|(file, (count, first_seen))| (file, count, first_seen))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    stats.top_risky_files = ranked
        .into_iter()
        .take(TOP_RISKY_FILES_LIMIT)
        .map(|(file, count, _)| (file, count))
        .collect();

    // Recent violations: entry time descending. Entries arrive newest
    // first, but an explicit stable sort keeps the contract honest when
    // timestamps and insertion order disagree.
    recent.sort_by(|a, b| b.0.cmp(&a.0));
    stats.recent_violations = recent
        .into_iter()
        .take(RECENT_VIOLATIONS_LIMIT)
        .map(|(_, v)| v)
        .collect();

    stats
}
