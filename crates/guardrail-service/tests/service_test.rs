//! End-to-end boundary tests: verdicts, advisory mode, admin overrides,
//! and the ledger's ground-truth guarantee.

use std::sync::Arc;
use std::time::Duration;

use guardrail_analysis::admission::AdmissionLimiter;
use guardrail_analysis::classifier::{Classifier, ClassifierFinding, ClassifierInput};
use guardrail_analysis::license::HeuristicLicenseScanner;
use guardrail_analysis::orchestrator::HybridOrchestrator;
use guardrail_analysis::rules::RuleEngine;
use guardrail_core::errors::ClassifierError;
use guardrail_core::types::audit::AuditEventType;
use guardrail_core::types::rules::EnforcementMode;
use guardrail_core::types::scan::{ScanFile, ScanRequest, ScanStatus};
use guardrail_core::types::violation::Severity;
use guardrail_service::{ApiError, Guardrail, OverrideRequest};
use guardrail_storage::GuardrailStore;

/// Quiet classifier — no findings, never fails.
struct SilentClassifier;

impl Classifier for SilentClassifier {
    async fn classify(
        &self,
        _input: ClassifierInput,
    ) -> Result<Vec<ClassifierFinding>, ClassifierError> {
        Ok(Vec::new())
    }
}

fn service() -> (tempfile::TempDir, Guardrail<SilentClassifier>) {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("default_rules.yaml"),
        r#"
rules:
  - id: SEC-001
    pattern: 'password\s*='
    message: Hardcoded password.
    severity: BLOCKING
    category: SECURITY
"#,
    )
    .unwrap();

    let orchestrator = HybridOrchestrator::new(
        Arc::new(RuleEngine::load(dir.path())),
        Arc::new(HeuristicLicenseScanner),
        Arc::new(SilentClassifier),
        Arc::new(AdmissionLimiter::new(4, Duration::ZERO)),
    );
    let store = Arc::new(GuardrailStore::open_in_memory().unwrap());
    (dir, Guardrail::new(orchestrator, store))
}

fn password_request(config_override: Option<&str>) -> ScanRequest {
    ScanRequest {
        repo_full_name: "acme/widgets".to_string(),
        pr_number: Some(42),
        commit_sha: "deadbeef".to_string(),
        files: vec![ScanFile {
            filename: "config.py".to_string(),
            content: "password = \"123\"".to_string(),
        }],
        config_override: config_override.map(str::to_string),
        is_copilot_generated: false,
    }
}

#[tokio::test]
async fn blocking_violation_fails_the_scan() {
    let (_dir, service) = service();
    let response = service.submit_scan(password_request(None)).await;

    assert_eq!(response.status, ScanStatus::Success);
    assert!(!response.succeeded);
    assert_eq!(response.violations.len(), 1);
    assert_eq!(response.violations[0].severity, Severity::Blocking);
    assert_eq!(response.enforcement_mode, EnforcementMode::Blocking);
    assert_eq!(response.summary, "Found 1 violations.");
}

#[tokio::test]
async fn advisory_mode_reports_but_never_fails() {
    let (_dir, service) = service();
    let response = service
        .submit_scan(password_request(Some("enforcement_mode: advisory")))
        .await;

    assert!(response.succeeded);
    assert!(!response.violations.is_empty());
    assert_eq!(response.enforcement_mode, EnforcementMode::Advisory);
    assert!(response.summary.starts_with("[ADVISORY]"));
}

#[tokio::test]
async fn override_rewrites_response_but_ledger_keeps_ground_truth() {
    let (_dir, service) = service();

    let overridden = service
        .admin_override(OverrideRequest {
            repo: "acme/widgets".to_string(),
            commit_sha: "deadbeef".to_string(),
            admin_user: Some("alice".to_string()),
            reason: Some("accepted risk".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(overridden.status, "overridden");

    // The scan would otherwise fail — the override forces success and
    // clears the returned violation list.
    let response = service.submit_scan(password_request(None)).await;
    assert!(response.succeeded);
    assert!(response.violations.is_empty());

    // The ledger still records the pre-override verdict, plus a
    // distinct override event.
    let entries = service.store().recent_entries(None).await.unwrap();
    let scan = entries
        .iter()
        .find(|e| e.event_type == AuditEventType::ScanCompleted)
        .unwrap();
    assert_eq!(scan.violations_count, 1);
    assert_eq!(scan.violations[0].rule_id, "SEC-001");
    assert_eq!(scan.metadata["succeeded"], serde_json::json!(false));

    let override_event = entries
        .iter()
        .find(|e| e.event_type == AuditEventType::OverrideIssued)
        .unwrap();
    assert_eq!(override_event.metadata["admin_user"], serde_json::json!("alice"));
}

#[tokio::test]
async fn override_is_commit_scoped() {
    let (_dir, service) = service();
    service
        .admin_override(OverrideRequest {
            repo: "acme/widgets".to_string(),
            commit_sha: "other-sha".to_string(),
            admin_user: None,
            reason: None,
        })
        .await
        .unwrap();

    // Different commit on the same repo — not overridden.
    let response = service.submit_scan(password_request(None)).await;
    assert!(!response.succeeded);
    assert_eq!(response.violations.len(), 1);
}

#[tokio::test]
async fn override_requires_repo_and_commit() {
    let (_dir, service) = service();

    let err = service
        .admin_override(OverrideRequest {
            repo: String::new(),
            commit_sha: "sha".to_string(),
            admin_user: None,
            reason: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Client(_)));

    let err = service
        .admin_override(OverrideRequest {
            repo: "r".to_string(),
            commit_sha: "  ".to_string(),
            admin_user: None,
            reason: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Client(_)));
}

#[tokio::test]
async fn stats_reflect_scans_through_the_boundary() {
    let (_dir, service) = service();
    service.submit_scan(password_request(None)).await;
    service.submit_scan(password_request(None)).await;

    let stats = service.stats(None).await.unwrap();
    assert_eq!(stats.scan_count, 2);
    assert_eq!(stats.severity_histogram.get("BLOCKING"), Some(&2));
    assert_eq!(stats.top_risky_files[0].0, "config.py");

    let unbounded = service.stats(Some(-1)).await.unwrap();
    assert_eq!(unbounded.scan_count, 2);
}

#[tokio::test]
async fn service_assembles_from_config() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("default_rules.yaml"),
        r#"
rules:
  - id: SEC-001
    pattern: 'password\s*='
    message: Hardcoded password.
    severity: BLOCKING
    category: SECURITY
"#,
    )
    .unwrap();

    let config = guardrail_core::GuardrailConfig {
        rules_dir: Some(dir.path().to_path_buf()),
        db_path: Some(dir.path().join("audit.db")),
        classifier_pace_ms: Some(0),
        default_stats_window_days: Some(7),
        ..Default::default()
    };
    let service = Guardrail::from_config(&config, SilentClassifier).unwrap();

    // Rules dir and db path both came from the config.
    let response = service.submit_scan(password_request(None)).await;
    assert!(!response.succeeded);
    assert_eq!(response.violations[0].rule_id, "SEC-001");

    let stats = service.stats(None).await.unwrap();
    assert_eq!(stats.scan_count, 1);
}

#[tokio::test]
async fn clean_scan_succeeds() {
    let (_dir, service) = service();
    let mut request = password_request(None);
    request.files[0].content = "nothing suspicious".to_string();

    let response = service.submit_scan(request).await;
    assert!(response.succeeded);
    assert!(response.violations.is_empty());
    assert_eq!(response.summary, "Found 0 violations.");
}
