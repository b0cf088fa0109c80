//! Static scanner ordering and match-count properties.

use guardrail_analysis::static_scan::StaticScanner;
use guardrail_core::types::rules::Rule;
use guardrail_core::types::violation::{Category, Severity, ViolationSource};
use proptest::prelude::*;

fn rule(id: &str, pattern: &str, severity: Severity) -> Rule {
    Rule {
        id: id.to_string(),
        pattern: pattern.to_string(),
        message: format!("{id} matched"),
        severity,
        category: Category::Security,
    }
}

#[test]
fn one_violation_per_matching_line() {
    let rules = vec![rule("R-1", "token", Severity::Warning)];
    let content = "clean\ntoken here\nclean\ntoken again\ntoken third";
    let violations = StaticScanner::scan("a.py", content, &rules);

    assert_eq!(violations.len(), 3);
    let lines: Vec<u32> = violations.iter().map(|v| v.line_number).collect();
    assert_eq!(lines, vec![2, 4, 5]);
}

#[test]
fn one_violation_per_line_even_with_repeated_matches() {
    let rules = vec![rule("R-1", "x", Severity::Info)];
    let violations = StaticScanner::scan("a.py", "x x x x", &rules);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].line_number, 1);
}

#[test]
fn within_a_line_rule_order_is_preserved() {
    let rules = vec![
        rule("R-2", "ab", Severity::Info),
        rule("R-1", "abc", Severity::Info),
    ];
    let violations = StaticScanner::scan("a.py", "abc", &rules);
    assert_eq!(violations.len(), 2);
    assert_eq!(violations[0].rule_id, "R-2");
    assert_eq!(violations[1].rule_id, "R-1");
}

#[test]
fn invalid_pattern_is_skipped_not_fatal() {
    let rules = vec![
        rule("BAD", "(unclosed", Severity::Blocking),
        rule("GOOD", "token", Severity::Warning),
    ];
    let violations = StaticScanner::scan("a.py", "token", &rules);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].rule_id, "GOOD");
}

#[test]
fn hardcoded_password_scenario() {
    let rules = vec![rule("SEC-001", r"password\s*=", Severity::Blocking)];
    let violations = StaticScanner::scan("config.py", "password = \"123\"", &rules);

    assert_eq!(violations.len(), 1);
    let v = &violations[0];
    assert_eq!(v.line_number, 1);
    assert_eq!(v.severity, Severity::Blocking);
    assert_eq!(v.file_path, "config.py");
    assert_eq!(v.source, ViolationSource::RuleEngine);
}

#[test]
fn empty_rule_set_finds_nothing() {
    assert!(StaticScanner::scan("a.py", "password = 1", &[]).is_empty());
}

proptest! {
    /// k non-overlapping matching lines yield exactly k violations with
    /// strictly increasing line numbers.
    #[test]
    fn matching_lines_map_one_to_one(flags in proptest::collection::vec(any::<bool>(), 0..50)) {
        let content: Vec<&str> = flags
            .iter()
            .map(|&hit| if hit { "needle here" } else { "clean line" })
            .collect();
        let rules = vec![rule("R-1", "needle", Severity::Warning)];
        let violations = StaticScanner::scan("f.rs", &content.join("\n"), &rules);

        let expected = flags.iter().filter(|&&hit| hit).count();
        prop_assert_eq!(violations.len(), expected);
        for pair in violations.windows(2) {
            prop_assert!(pair[0].line_number < pair[1].line_number);
        }
    }
}
