//! Process-level configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the Guardrail gatekeeper.
///
/// The classifier admission bound and pacing delay live here rather than
/// in code: both were historically tuned in production (the bound down to
/// 1) to stay under a restrictive external quota.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GuardrailConfig {
    /// Directory holding `default_rules.yaml` and `<pack>_rules.yaml`.
    pub rules_dir: Option<PathBuf>,
    /// Audit/override database path. Default: "guardrail.db".
    pub db_path: Option<PathBuf>,
    /// Max in-flight classifier calls process-wide. Default: 1.
    pub classifier_max_in_flight: Option<usize>,
    /// Pacing delay in ms applied while holding an admission slot,
    /// before each classifier call. Default: 2000.
    pub classifier_pace_ms: Option<u64>,
    /// Classifier retry attempts before giving up. Default: 3.
    pub classifier_max_attempts: Option<u32>,
    /// Row-scan cap for stats queries. `None` aggregates the full
    /// filtered window; setting it trades exactness on very long
    /// histories for bounded query latency.
    pub stats_row_limit: Option<usize>,
    /// Default stats window in days. Default: 30.
    pub default_stats_window_days: Option<i64>,
}

impl GuardrailConfig {
    pub fn effective_rules_dir(&self) -> PathBuf {
        self.rules_dir.clone().unwrap_or_else(|| PathBuf::from("rules"))
    }

    pub fn effective_db_path(&self) -> PathBuf {
        self.db_path
            .clone()
            .unwrap_or_else(|| PathBuf::from("guardrail.db"))
    }

    pub fn effective_classifier_max_in_flight(&self) -> usize {
        self.classifier_max_in_flight.unwrap_or(1).max(1)
    }

    pub fn effective_classifier_pace(&self) -> Duration {
        Duration::from_millis(self.classifier_pace_ms.unwrap_or(2000))
    }

    pub fn effective_classifier_max_attempts(&self) -> u32 {
        self.classifier_max_attempts.unwrap_or(3).max(1)
    }

    pub fn effective_stats_window_days(&self) -> i64 {
        self.default_stats_window_days.unwrap_or(30)
    }
}
