//! Core type contracts: validating construction, lenient wire parsing,
//! count invariants.

use guardrail_core::types::audit::AuditEntry;
use guardrail_core::types::rules::RuleResolutionConfig;
use guardrail_core::types::violation::{Category, Severity, Violation, ViolationSource};

fn try_violation(rule_id: &str, file: &str, line: u32) -> Result<Violation, guardrail_core::GuardrailError> {
    Violation::new(
        ViolationSource::Classifier,
        rule_id,
        "m",
        Severity::Info,
        Category::AiReview,
        file,
        line,
        None,
    )
}

#[test]
fn violation_constructor_rejects_malformed_input() {
    assert!(try_violation("R-1", "a.py", 1).is_ok());
    assert!(try_violation("", "a.py", 1).is_err());
    assert!(try_violation("R-1", "", 1).is_err());
    assert!(try_violation("R-1", "a.py", 0).is_err());
}

#[test]
fn unknown_severity_levels_never_block() {
    assert_eq!(Severity::from("BLOCKING".to_string()), Severity::Blocking);
    assert_eq!(Severity::from("info".to_string()), Severity::Info);
    // CRITICAL/HIGH are not in the blocking set; they surface as warnings.
    assert_eq!(Severity::from("CRITICAL".to_string()), Severity::Warning);
    assert_eq!(Severity::from("HIGH".to_string()), Severity::Warning);
    assert_eq!(Severity::from("garbage".to_string()), Severity::Warning);
}

#[test]
fn unknown_categories_deserialize_to_unknown() {
    assert_eq!(Category::from("SECURITY".to_string()), Category::Security);
    assert_eq!(Category::from("ai_review".to_string()), Category::AiReview);
    assert_eq!(Category::from("WHATEVER".to_string()), Category::Unknown);
}

#[test]
fn violation_json_round_trips() {
    let v = try_violation("AI-SEC-1", "a.py", 3).unwrap();
    let json = serde_json::to_string(&v).unwrap();
    let back: Violation = serde_json::from_str(&json).unwrap();
    assert_eq!(v, back);
}

#[test]
fn audit_entry_count_matches_violations() {
    let violations = vec![
        try_violation("R-1", "a.py", 1).unwrap(),
        try_violation("R-2", "a.py", 2).unwrap(),
    ];
    let entry = AuditEntry::scan_completed("r", None, "sha", "success", violations, serde_json::json!({}));
    assert_eq!(entry.violations_count, entry.violations.len());
    assert_eq!(entry.violations_count, 2);

    let override_entry = AuditEntry::override_issued("r", "sha", serde_json::json!({}));
    assert_eq!(override_entry.violations_count, 0);
    assert!(override_entry.violations.is_empty());
}

#[test]
fn tracing_init_is_idempotent() {
    guardrail_core::telemetry::init_tracing();
    // A second call must be a no-op, not a panic.
    guardrail_core::telemetry::init_tracing();
}

#[test]
fn override_config_defaults_are_safe() {
    let config = RuleResolutionConfig::parse("rule_pack: strict").unwrap();
    assert_eq!(config.effective_rule_pack(), "strict");
    assert!(config.rules.is_none());

    let config = RuleResolutionConfig::parse("{}").unwrap();
    assert_eq!(config.effective_rule_pack(), "default");

    assert!(RuleResolutionConfig::parse(": bad [").is_none());
}
