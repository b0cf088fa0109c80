//! Rule definitions and the override-configuration text contract.

use serde::{Deserialize, Serialize};

use super::violation::{Category, Severity};

/// A deterministic pattern rule. Immutable once loaded.
///
/// Ids are not guaranteed unique across a merged base+pack set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    /// Single-line regex, searched per physical line.
    pub pattern: String,
    pub message: String,
    pub severity: Severity,
    pub category: Category,
}

/// Enforcement mode for the request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnforcementMode {
    #[default]
    Blocking,
    Advisory,
}

impl EnforcementMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blocking => "blocking",
            Self::Advisory => "advisory",
        }
    }

    /// Read `enforcement_mode` from override text. Absence or parse
    /// failure defaults to `Blocking` — never an error.
    pub fn from_override(text: Option<&str>) -> Self {
        match text.and_then(RuleResolutionConfig::parse) {
            Some(config) => config.effective_enforcement_mode(),
            None => Self::Blocking,
        }
    }
}

/// Recognized keys of the override configuration text (YAML).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RuleResolutionConfig {
    /// Named supplementary rule bundle. Default "default" (base only).
    pub rule_pack: Option<String>,
    /// Full-replace rule list. If present, base and pack are ignored.
    pub rules: Option<Vec<Rule>>,
    /// "blocking" | "advisory". Anything else falls back to blocking.
    pub enforcement_mode: Option<String>,
}

impl RuleResolutionConfig {
    /// Parse override text. `None` on any YAML error — fallback is the
    /// expected common path here, not an exception.
    pub fn parse(text: &str) -> Option<Self> {
        serde_yaml::from_str(text).ok()
    }

    pub fn effective_rule_pack(&self) -> &str {
        self.rule_pack.as_deref().unwrap_or("default")
    }

    pub fn effective_enforcement_mode(&self) -> EnforcementMode {
        match self.enforcement_mode.as_deref() {
            Some(mode) if mode.eq_ignore_ascii_case("advisory") => EnforcementMode::Advisory,
            _ => EnforcementMode::Blocking,
        }
    }
}
