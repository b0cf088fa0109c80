//! # guardrail-analysis
//!
//! Analysis engine for the Guardrail code-change gatekeeper.
//! Contains the rule engine, static scanner, license heuristics,
//! classifier contract, shared admission limiter, hybrid orchestrator,
//! and enforcement decider.

pub mod admission;
pub mod classifier;
pub mod decider;
pub mod license;
pub mod orchestrator;
pub mod rules;
pub mod static_scan;

pub use admission::AdmissionLimiter;
pub use classifier::{Classifier, ClassifierFinding, ClassifierInput, MockClassifier, Retrying};
pub use decider::{decide, Verdict};
pub use license::{is_dependency_manifest, HeuristicLicenseScanner, LicenseCheck};
pub use orchestrator::HybridOrchestrator;
pub use rules::{ResolutionOrigin, RuleEngine, RuleResolution};
pub use static_scan::StaticScanner;
