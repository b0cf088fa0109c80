//! Aggregate statistics over the audit ledger.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::violation::Violation;

/// Caps applied to the ranked lists, matching the dashboard contract.
pub const TOP_RISKY_FILES_LIMIT: usize = 5;
pub const RECENT_VIOLATIONS_LIMIT: usize = 10;

/// Windowed aggregates over the ledger. Aggregation only ever reads the
/// ledger — the ledger is the sole source of truth.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditStats {
    /// Scan events in the window, with or without violations.
    pub scan_count: u64,
    /// Violation counts keyed by category name, over in-window entries
    /// that carried at least one violation.
    pub category_histogram: HashMap<String, u64>,
    /// Violation counts keyed by severity name, same population.
    pub severity_histogram: HashMap<String, u64>,
    /// At most 5 file paths, violation count descending; ties broken by
    /// first-seen order walking the ledger newest-first.
    pub top_risky_files: Vec<(String, u64)>,
    /// At most 10 flattened violations, entry time descending.
    pub recent_violations: Vec<Violation>,
}
