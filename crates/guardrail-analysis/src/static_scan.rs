//! Static scanner — applies the active rules to file content, line by
//! line. Pure: no I/O, no shared state.

use regex::Regex;

use guardrail_core::types::rules::Rule;
use guardrail_core::types::violation::{Violation, ViolationSource};

pub struct StaticScanner;

impl StaticScanner {
    /// Scan one file against the active rules.
    ///
    /// Single-line search: one match per (line, rule) yields exactly one
    /// violation, even if the pattern occurs multiple times on that line.
    /// Output is ordered by line ascending, then rule order as given.
    /// Lines are physical, 1-based. Invalid patterns are skipped.
    pub fn scan(filename: &str, content: &str, rules: &[Rule]) -> Vec<Violation> {
        let compiled: Vec<Option<Regex>> = rules
            .iter()
            .map(|rule| match Regex::new(&rule.pattern) {
                Ok(re) => Some(re),
                Err(e) => {
                    tracing::warn!(rule_id = %rule.id, error = %e, "invalid rule pattern");
                    None
                }
            })
            .collect();

        let mut violations = Vec::new();
        for (i, line) in content.split('\n').enumerate() {
            for (rule, re) in rules.iter().zip(&compiled) {
                let Some(re) = re else { continue };
                if !re.is_match(line) {
                    continue;
                }
                match Violation::new(
                    ViolationSource::RuleEngine,
                    &rule.id,
                    &rule.message,
                    rule.severity,
                    rule.category,
                    filename,
                    (i + 1) as u32,
                    None,
                ) {
                    Ok(v) => violations.push(v),
                    Err(e) => {
                        tracing::warn!(rule_id = %rule.id, error = %e, "dropped malformed rule match");
                    }
                }
            }
        }
        violations
    }
}
