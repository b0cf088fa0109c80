//! The Guardrail service facade.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use guardrail_analysis::admission::AdmissionLimiter;
use guardrail_analysis::classifier::{Classifier, Retrying};
use guardrail_analysis::decider;
use guardrail_analysis::license::HeuristicLicenseScanner;
use guardrail_analysis::orchestrator::HybridOrchestrator;
use guardrail_analysis::rules::RuleEngine;
use guardrail_core::config::GuardrailConfig;
use guardrail_core::types::audit::{AuditEntry, OverrideRecord};
use guardrail_core::types::scan::{ScanRequest, ScanResponse, ScanStatus};
use guardrail_core::types::stats::AuditStats;
use guardrail_core::GuardrailResult;
use guardrail_storage::GuardrailStore;

/// Error surface of the boundary. Client errors are the caller's fault
/// (validation); server errors are ours — both carry a message, never a
/// raw internal trace.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Client(String),

    #[error("{0}")]
    Server(String),
}

/// Admin override request.
#[derive(Debug, Clone, Deserialize)]
pub struct OverrideRequest {
    pub repo: String,
    pub commit_sha: String,
    #[serde(default)]
    pub admin_user: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Admin override response.
#[derive(Debug, Clone, Serialize)]
pub struct OverrideResponse {
    pub status: &'static str,
}

/// The gatekeeper service. One instance per process; the admission
/// limiter inside the orchestrator is the process-wide classifier gate.
pub struct Guardrail<C: Classifier + 'static> {
    orchestrator: HybridOrchestrator<C>,
    store: Arc<GuardrailStore>,
    default_stats_window_days: i64,
}

impl<C: Classifier + 'static> Guardrail<Retrying<C>> {
    /// Assemble a service from config: rules directory, database path,
    /// retry budget, admission limits, and the default stats window.
    /// The classifier is wrapped with its configured retry budget.
    pub fn from_config(config: &GuardrailConfig, classifier: C) -> GuardrailResult<Self> {
        let store = GuardrailStore::open(&config.effective_db_path())?
            .with_stats_row_limit(config.stats_row_limit);
        let orchestrator = HybridOrchestrator::new(
            Arc::new(RuleEngine::load(config.effective_rules_dir())),
            Arc::new(HeuristicLicenseScanner),
            Arc::new(Retrying::new(
                classifier,
                config.effective_classifier_max_attempts(),
            )),
            Arc::new(AdmissionLimiter::from_config(config)),
        );
        Ok(Guardrail::new(orchestrator, Arc::new(store))
            .with_default_stats_window(config.effective_stats_window_days()))
    }
}

impl<C: Classifier + 'static> Guardrail<C> {
    pub fn new(orchestrator: HybridOrchestrator<C>, store: Arc<GuardrailStore>) -> Self {
        Self {
            orchestrator,
            store,
            default_stats_window_days: 30,
        }
    }

    pub fn with_default_stats_window(mut self, days: i64) -> Self {
        self.default_stats_window_days = days;
        self
    }

    /// Evaluate the changed files of one commit/PR.
    ///
    /// Never fails outward: any internal error maps to an error-status
    /// response with a message.
    pub async fn submit_scan(&self, request: ScanRequest) -> ScanResponse {
        match self.scan_inner(&request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(
                    repo = %request.repo_full_name,
                    commit = %request.commit_sha,
                    error = %e,
                    "scan failed"
                );
                ScanResponse::internal_error(format!("scan failed: {e}"))
            }
        }
    }

    async fn scan_inner(&self, request: &ScanRequest) -> GuardrailResult<ScanResponse> {
        let violations = self.orchestrator.analyze(request).await;
        let verdict = decider::decide(&violations, request.config_override.as_deref());

        // The ledger records ground truth: the pre-override verdict and
        // the full violation set, whatever we return to the caller.
        let entry = AuditEntry::scan_completed(
            &request.repo_full_name,
            request.pr_number,
            &request.commit_sha,
            ScanStatus::Success.as_str(),
            violations.clone(),
            serde_json::json!({
                "succeeded": verdict.succeeded,
                "enforcement_mode": verdict.enforcement_mode.as_str(),
                "is_copilot_generated": request.is_copilot_generated,
            }),
        );

        let overridden = match self
            .store
            .is_overridden(&request.repo_full_name, &request.commit_sha)
            .await
        {
            Ok(overridden) => overridden,
            Err(e) => {
                // Ground truth wins when the override store is down.
                tracing::error!(error = %e, "override lookup failed; treating as not overridden");
                false
            }
        };

        // Best-effort persistence: a failed append is logged, never
        // surfaced as a scan failure.
        if let Err(e) = self.store.append_entry(&entry).await {
            tracing::error!(error = %e, "failed to persist scan audit entry");
        }

        let (succeeded, violations) = if overridden {
            tracing::info!(
                repo = %request.repo_full_name,
                commit = %request.commit_sha,
                "override detected; forcing success"
            );
            (true, Vec::new())
        } else {
            (verdict.succeeded, violations)
        };

        Ok(ScanResponse {
            status: ScanStatus::Success,
            violations,
            succeeded,
            summary: verdict.summary,
            enforcement_mode: verdict.enforcement_mode,
        })
    }

    /// Record an administrator override for one exact (repo, commit)
    /// pair. Future scans of that pair return success.
    pub async fn admin_override(
        &self,
        request: OverrideRequest,
    ) -> Result<OverrideResponse, ApiError> {
        if request.repo.trim().is_empty() {
            return Err(ApiError::Client("repo is required".into()));
        }
        if request.commit_sha.trim().is_empty() {
            return Err(ApiError::Client("commit_sha is required".into()));
        }

        let admin_user = request.admin_user.unwrap_or_else(|| "admin".to_string());
        let reason = request.reason.unwrap_or_default();

        let record = OverrideRecord::new(&request.repo, &request.commit_sha, &admin_user, &reason);
        self.store
            .record_override(&record)
            .await
            .map_err(|e| ApiError::Server(format!("failed to record override: {e}")))?;

        // The override act is its own distinctly-typed ledger event.
        let entry = AuditEntry::override_issued(
            &request.repo,
            &request.commit_sha,
            serde_json::json!({
                "admin_user": admin_user,
                "reason": reason,
            }),
        );
        self.store
            .append_entry(&entry)
            .await
            .map_err(|e| ApiError::Server(format!("failed to audit override: {e}")))?;

        Ok(OverrideResponse {
            status: "overridden",
        })
    }

    /// Windowed aggregate stats. Default window 30 days; -1 unbounded.
    pub async fn stats(&self, days: Option<i64>) -> Result<AuditStats, ApiError> {
        let days = days.unwrap_or(self.default_stats_window_days);
        self.store
            .query_stats(days)
            .await
            .map_err(|e| ApiError::Server(format!("stats query failed: {e}")))
    }

    /// Read-back for reporting collaborators.
    pub fn store(&self) -> &Arc<GuardrailStore> {
        &self.store
    }
}
