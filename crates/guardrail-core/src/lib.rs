//! # guardrail-core
//!
//! Foundation crate for the Guardrail code-change gatekeeper.
//! Defines all types, errors, and config. Every other crate in the
//! workspace depends on this.

pub mod config;
pub mod errors;
pub mod telemetry;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::GuardrailConfig;
pub use errors::{ClassifierError, GuardrailError, GuardrailResult, StorageError};
pub use types::audit::{AuditEntry, AuditEventType, OverrideRecord};
pub use types::rules::{EnforcementMode, Rule, RuleResolutionConfig};
pub use types::scan::{ScanFile, ScanRequest, ScanResponse, ScanStatus};
pub use types::stats::AuditStats;
pub use types::violation::{Category, Severity, Violation, ViolationSource};
