//! Hybrid orchestrator — fans out per-file pipelines (static scan →
//! license check | classifier call), reassembles results in original
//! file order.
//!
//! Every classifier call goes through the shared `AdmissionLimiter`,
//! which bounds in-flight calls across all concurrently active requests
//! in the process. A classifier failure after its retry budget is
//! absorbed into one synthetic system violation for that file — one
//! unreliable file never aborts the request. No mid-request
//! cancellation: a request runs to completion.

use std::sync::Arc;

use guardrail_core::types::rules::Rule;
use guardrail_core::types::scan::ScanRequest;
use guardrail_core::types::violation::{Category, Severity, Violation, ViolationSource};

use crate::admission::AdmissionLimiter;
use crate::classifier::{findings_to_violations, Classifier, ClassifierInput};
use crate::license::{is_dependency_manifest, LicenseCheck};
use crate::rules::RuleEngine;
use crate::static_scan::StaticScanner;

/// Rule id of the synthetic violation emitted when the classifier is
/// unavailable for a file.
pub const CLASSIFIER_FAILURE_RULE_ID: &str = "SYS-CLASSIFIER-FAIL";

pub struct HybridOrchestrator<C> {
    rule_engine: Arc<RuleEngine>,
    license: Arc<dyn LicenseCheck>,
    classifier: Arc<C>,
    limiter: Arc<AdmissionLimiter>,
}

impl<C: Classifier + 'static> HybridOrchestrator<C> {
    pub fn new(
        rule_engine: Arc<RuleEngine>,
        license: Arc<dyn LicenseCheck>,
        classifier: Arc<C>,
        limiter: Arc<AdmissionLimiter>,
    ) -> Self {
        Self {
            rule_engine,
            license,
            classifier,
            limiter,
        }
    }

    /// Analyze all files of one request concurrently and return one flat
    /// violation list: files in request order, and within a file
    /// static → license → classifier, regardless of completion order.
    pub async fn analyze(&self, request: &ScanRequest) -> Vec<Violation> {
        let resolution = self.rule_engine.resolve(request.config_override.as_deref());
        tracing::debug!(
            repo = %request.repo_full_name,
            commit = %request.commit_sha,
            files = request.files.len(),
            active_rules = resolution.rules.len(),
            origin = ?resolution.origin,
            "dispatching hybrid analysis"
        );
        let rules: Arc<Vec<Rule>> = Arc::new(resolution.rules);

        let mut handles = Vec::with_capacity(request.files.len());
        for file in &request.files {
            let filename = file.filename.clone();
            let content = file.content.clone();
            let rules = Arc::clone(&rules);
            let license = Arc::clone(&self.license);
            let classifier = Arc::clone(&self.classifier);
            let limiter = Arc::clone(&self.limiter);
            let copilot = request.is_copilot_generated;

            handles.push(tokio::spawn(async move {
                analyze_file(filename, content, rules, license, classifier, limiter, copilot).await
            }));
        }

        // Join in spawn order — completion order is irrelevant to output.
        let mut violations = Vec::new();
        for (idx, handle) in handles.into_iter().enumerate() {
            match handle.await {
                Ok(file_violations) => violations.extend(file_violations),
                Err(e) => {
                    // A panicked file task degrades to a system finding.
                    let filename = &request.files[idx].filename;
                    tracing::error!(filename = %filename, error = %e, "file analysis task failed");
                    if let Some(v) = system_failure(filename, &format!("analysis task failed: {e}"))
                    {
                        violations.push(v);
                    }
                }
            }
        }
        violations
    }
}

/// One per-file pipeline: static scan, then license check for dependency
/// manifests, or an admission-limited classifier call for everything else.
async fn analyze_file<C: Classifier>(
    filename: String,
    content: String,
    rules: Arc<Vec<Rule>>,
    license: Arc<dyn LicenseCheck>,
    classifier: Arc<C>,
    limiter: Arc<AdmissionLimiter>,
    copilot_generated: bool,
) -> Vec<Violation> {
    let static_violations = StaticScanner::scan(&filename, &content, &rules);
    let mut out = static_violations.clone();

    if is_dependency_manifest(&filename) {
        out.extend(license.scan(&filename, &content));
        return out;
    }

    let input = ClassifierInput {
        filename: filename.clone(),
        content,
        static_context: static_violations,
        copilot_generated,
    };

    let result = async {
        let _permit = limiter.admit().await.map_err(|e| {
            guardrail_core::errors::ClassifierError::Transport(format!(
                "admission limiter closed: {e}"
            ))
        })?;
        // Permit held across the call — this is the admission contract.
        classifier.classify(input).await
    }
    .await
    .and_then(|findings| findings_to_violations(&filename, findings));

    match result {
        Ok(classifier_violations) => out.extend(classifier_violations),
        Err(e) => {
            tracing::warn!(filename = %filename, error = %e, "classifier analysis unavailable");
            if let Some(v) = system_failure(&filename, &format!("AI analysis unavailable: {e}")) {
                out.push(v);
            }
        }
    }
    out
}

/// Exactly one synthetic violation per affected file: system category,
/// warning severity, line 1, message carrying the failure reason.
fn system_failure(filename: &str, message: &str) -> Option<Violation> {
    Violation::new(
        ViolationSource::SystemFailure,
        CLASSIFIER_FAILURE_RULE_ID,
        message,
        Severity::Warning,
        Category::System,
        filename,
        1,
        None,
    )
    .map_err(|e| tracing::error!(error = %e, "failed to build system violation"))
    .ok()
}
