//! Rule engine — resolves the base rule set plus an optional per-request
//! override into an ordered active rule list.
//!
//! Missing files, missing packs, and bad override text are all expected
//! fallback paths, surfaced as `ResolutionOrigin` variants rather than
//! errors. A parse failure must never raise past this boundary.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use guardrail_core::types::rules::{Rule, RuleResolutionConfig};

/// On-disk rule file shape: a single `rules` list.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RuleFile {
    rules: Vec<Rule>,
}

/// How the active rule list was arrived at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOrigin {
    /// Override text carried an explicit `rules` list — full replace.
    CustomRules,
    /// Base rules concatenated with the named pack (duplicates allowed).
    BasePlusPack(String),
    /// No override text, or it named the default pack.
    Base,
    /// Override named a pack whose file does not exist — silent fallback.
    FallbackMissingPack(String),
    /// Override text failed to parse — silent fallback.
    FallbackParseError,
}

/// The resolved active rule list for one request.
#[derive(Debug, Clone)]
pub struct RuleResolution {
    pub rules: Vec<Rule>,
    pub origin: ResolutionOrigin,
}

/// Loads the base rule set once and resolves per-request overrides.
pub struct RuleEngine {
    rules_dir: PathBuf,
    base: Vec<Rule>,
}

impl RuleEngine {
    /// Load the base rule set from `<rules_dir>/default_rules.yaml`.
    /// A missing or unreadable file yields an empty base set — logged,
    /// not fatal.
    pub fn load(rules_dir: impl Into<PathBuf>) -> Self {
        let rules_dir = rules_dir.into();
        let base = load_rule_file(&rules_dir.join("default_rules.yaml"));
        Self { rules_dir, base }
    }

    pub fn base_rules(&self) -> &[Rule] {
        &self.base
    }

    /// Resolve the active rule list. Precedence, highest first:
    /// explicit `rules` list (full replace) → base ++ existing pack →
    /// base only.
    pub fn resolve(&self, override_text: Option<&str>) -> RuleResolution {
        let Some(text) = override_text else {
            return RuleResolution {
                rules: self.base.clone(),
                origin: ResolutionOrigin::Base,
            };
        };

        let Some(config) = RuleResolutionConfig::parse(text) else {
            tracing::warn!("override config failed to parse; using base rules");
            return RuleResolution {
                rules: self.base.clone(),
                origin: ResolutionOrigin::FallbackParseError,
            };
        };

        if let Some(custom) = config.rules {
            return RuleResolution {
                rules: custom,
                origin: ResolutionOrigin::CustomRules,
            };
        }

        let pack = config.effective_rule_pack();
        if pack != "default" {
            let pack_path = self.rules_dir.join(format!("{pack}_rules.yaml"));
            if pack_path.exists() {
                let mut rules = self.base.clone();
                rules.extend(load_rule_file(&pack_path));
                return RuleResolution {
                    rules,
                    origin: ResolutionOrigin::BasePlusPack(pack.to_string()),
                };
            }
            return RuleResolution {
                rules: self.base.clone(),
                origin: ResolutionOrigin::FallbackMissingPack(pack.to_string()),
            };
        }

        RuleResolution {
            rules: self.base.clone(),
            origin: ResolutionOrigin::Base,
        }
    }
}

/// Read one rule file. Any failure (missing, unreadable, unparseable)
/// yields an empty list with a warning.
fn load_rule_file(path: &Path) -> Vec<Rule> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "rules file not found");
            return Vec::new();
        }
    };
    match serde_yaml::from_str::<RuleFile>(&text) {
        Ok(file) => file.rules,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "rules file failed to parse");
            Vec::new()
        }
    }
}
