//! Rule resolution precedence: custom rules → base ++ pack → base only,
//! with silent fallback on missing packs and bad override text.

use guardrail_analysis::rules::{ResolutionOrigin, RuleEngine};
use guardrail_core::types::rules::EnforcementMode;

fn write_rules(dir: &std::path::Path, name: &str, yaml: &str) {
    std::fs::write(dir.join(name), yaml).unwrap();
}

fn setup() -> (tempfile::TempDir, RuleEngine) {
    let dir = tempfile::tempdir().unwrap();
    write_rules(
        dir.path(),
        "default_rules.yaml",
        r#"
rules:
  - id: SEC-001
    pattern: 'password\s*='
    message: Hardcoded password.
    severity: BLOCKING
    category: SECURITY
  - id: STY-001
    pattern: '\bTODO\b'
    message: Unresolved TODO.
    severity: INFO
    category: STYLE
"#,
    );
    write_rules(
        dir.path(),
        "strict_rules.yaml",
        r#"
rules:
  - id: SEC-101
    pattern: '(?i)secret'
    message: Possible secret.
    severity: BLOCKING
    category: SECURITY
"#,
    );
    let engine = RuleEngine::load(dir.path());
    (dir, engine)
}

#[test]
fn resolve_without_override_returns_base() {
    let (_dir, engine) = setup();
    let resolution = engine.resolve(None);
    assert_eq!(resolution.origin, ResolutionOrigin::Base);
    assert_eq!(resolution.rules.len(), 2);
    assert_eq!(resolution.rules[0].id, "SEC-001");
}

#[test]
fn missing_rules_file_yields_empty_base() {
    let dir = tempfile::tempdir().unwrap();
    let engine = RuleEngine::load(dir.path().join("nonexistent"));
    assert!(engine.base_rules().is_empty());
    assert!(engine.resolve(None).rules.is_empty());
}

#[test]
fn explicit_rules_list_is_a_full_replace() {
    let (_dir, engine) = setup();
    let override_text = r#"
rule_pack: strict
rules:
  - id: CUSTOM-1
    pattern: 'foo'
    message: Custom rule.
    severity: WARNING
    category: STYLE
"#;
    let resolution = engine.resolve(Some(override_text));
    assert_eq!(resolution.origin, ResolutionOrigin::CustomRules);
    // Base and pack are both ignored, even though the pack exists.
    assert_eq!(resolution.rules.len(), 1);
    assert_eq!(resolution.rules[0].id, "CUSTOM-1");
}

#[test]
fn existing_pack_is_concatenated_after_base() {
    let (_dir, engine) = setup();
    let resolution = engine.resolve(Some("rule_pack: strict"));
    assert_eq!(
        resolution.origin,
        ResolutionOrigin::BasePlusPack("strict".to_string())
    );
    assert_eq!(resolution.rules.len(), 3);
    // Base order preserved, pack appended.
    assert_eq!(resolution.rules[0].id, "SEC-001");
    assert_eq!(resolution.rules[2].id, "SEC-101");
}

#[test]
fn duplicate_ids_across_base_and_pack_are_kept() {
    let dir = tempfile::tempdir().unwrap();
    write_rules(
        dir.path(),
        "default_rules.yaml",
        "rules:\n  - {id: R-1, pattern: a, message: m, severity: INFO, category: STYLE}\n",
    );
    write_rules(
        dir.path(),
        "extra_rules.yaml",
        "rules:\n  - {id: R-1, pattern: b, message: m, severity: INFO, category: STYLE}\n",
    );
    let engine = RuleEngine::load(dir.path());
    let resolution = engine.resolve(Some("rule_pack: extra"));
    assert_eq!(resolution.rules.len(), 2);
    assert_eq!(resolution.rules[0].id, resolution.rules[1].id);
}

#[test]
fn nonexistent_pack_falls_back_to_base() {
    let (_dir, engine) = setup();
    let resolution = engine.resolve(Some("rule_pack: nonexistent"));
    assert_eq!(
        resolution.origin,
        ResolutionOrigin::FallbackMissingPack("nonexistent".to_string())
    );
    assert_eq!(resolution.rules.len(), 2);
}

#[test]
fn unparseable_override_falls_back_to_base() {
    let (_dir, engine) = setup();
    let resolution = engine.resolve(Some("rules: [unclosed"));
    assert_eq!(resolution.origin, ResolutionOrigin::FallbackParseError);
    assert_eq!(resolution.rules.len(), 2);
}

#[test]
fn enforcement_mode_parses_independently() {
    assert_eq!(
        EnforcementMode::from_override(Some("enforcement_mode: advisory")),
        EnforcementMode::Advisory
    );
    assert_eq!(
        EnforcementMode::from_override(Some("enforcement_mode: ADVISORY")),
        EnforcementMode::Advisory
    );
    assert_eq!(
        EnforcementMode::from_override(Some("rule_pack: strict")),
        EnforcementMode::Blocking
    );
    assert_eq!(
        EnforcementMode::from_override(Some(": not yaml [")),
        EnforcementMode::Blocking
    );
    assert_eq!(EnforcementMode::from_override(None), EnforcementMode::Blocking);
}
