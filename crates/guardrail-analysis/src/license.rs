//! License heuristics for dependency manifests.
//!
//! A simple substring/dependency-name matcher: restricted license terms
//! anywhere in the manifest, plus a small knowledge base of packages with
//! strong copyleft licenses.

use regex::RegexBuilder;

use guardrail_core::types::violation::{Category, Severity, Violation, ViolationSource};

/// Filenames treated as dependency manifests. These files get the
/// license check and skip the classifier.
const MANIFEST_SUFFIXES: [&str; 3] = ["package.json", "requirements.txt", "pom.xml"];

const RESTRICTED_TERMS: [&str; 3] = ["GPL", "AGPL", "Affero"];

/// Known packages with strong copyleft licenses.
const KNOWN_RESTRICTED_PACKAGES: [(&str, &str); 4] = [
    ("ffmpeg", "LGPL/GPL"),
    ("linux", "GPL-2.0"),
    ("bash", "GPL-3.0"),
    ("ghostscript", "AGPL"),
];

/// Whether a filename names a dependency manifest.
pub fn is_dependency_manifest(filename: &str) -> bool {
    MANIFEST_SUFFIXES.iter().any(|s| filename.ends_with(s))
}

/// License check seam — the orchestrator only sees this trait.
pub trait LicenseCheck: Send + Sync {
    fn scan(&self, filename: &str, content: &str) -> Vec<Violation>;
}

/// Default heuristic implementation.
#[derive(Debug, Default)]
pub struct HeuristicLicenseScanner;

impl LicenseCheck for HeuristicLicenseScanner {
    fn scan(&self, filename: &str, content: &str) -> Vec<Violation> {
        let mut violations = Vec::new();

        // Explicit restricted license terms anywhere in the file.
        for term in RESTRICTED_TERMS {
            let matched = RegexBuilder::new(&format!(r"\b{term}\b"))
                .case_insensitive(true)
                .build()
                .map(|re| re.is_match(content))
                .unwrap_or(false);
            if matched {
                push_finding(
                    &mut violations,
                    filename,
                    "LIC-002",
                    format!(
                        "Restricted license term '{term}' detected in dependency file configuration."
                    ),
                );
            }
        }

        // Known restricted packages, per manifest format.
        if filename.ends_with("package.json") {
            violations.extend(scan_package_json(filename, content));
        } else if filename.ends_with("requirements.txt") {
            violations.extend(scan_requirements(filename, content));
        }

        violations
    }
}

fn scan_package_json(filename: &str, content: &str) -> Vec<Violation> {
    let mut violations = Vec::new();
    // Invalid JSON is ignored — the static scanner still covers the file.
    let Ok(data) = serde_json::from_str::<serde_json::Value>(content) else {
        return violations;
    };
    let mut names: Vec<&str> = Vec::new();
    for section in ["dependencies", "devDependencies"] {
        if let Some(deps) = data.get(section).and_then(|d| d.as_object()) {
            names.extend(deps.keys().map(String::as_str));
        }
    }
    for (pkg, license) in KNOWN_RESTRICTED_PACKAGES {
        if names.contains(&pkg) {
            push_finding(
                &mut violations,
                filename,
                "LIC-003",
                format!("Package '{pkg}' is known to use restricted license: {license}"),
            );
        }
    }
    violations
}

fn scan_requirements(filename: &str, content: &str) -> Vec<Violation> {
    let mut violations = Vec::new();
    for (pkg, license) in KNOWN_RESTRICTED_PACKAGES {
        let matched = RegexBuilder::new(&format!(r"(?m)^\s*{pkg}\b"))
            .build()
            .map(|re| re.is_match(content))
            .unwrap_or(false);
        if matched {
            push_finding(
                &mut violations,
                filename,
                "LIC-003",
                format!("Package '{pkg}' is known to use restricted license: {license}"),
            );
        }
    }
    violations
}

/// All license findings are file-level: blocking, compliance, line 1.
fn push_finding(out: &mut Vec<Violation>, filename: &str, rule_id: &str, message: String) {
    match Violation::new(
        ViolationSource::LicenseCheck,
        rule_id,
        message,
        Severity::Blocking,
        Category::Compliance,
        filename,
        1,
        None,
    ) {
        Ok(v) => out.push(v),
        Err(e) => tracing::warn!(error = %e, "dropped malformed license finding"),
    }
}
