//! # guardrail-service
//!
//! The orchestration boundary of the Guardrail gatekeeper. Composes the
//! hybrid orchestrator, enforcement decider, and ledger into the three
//! external operations: submit scan, admin override, stats query.
//!
//! No HTTP here — an embedding server maps these calls onto routes.

mod service;

pub use service::{ApiError, Guardrail, OverrideRequest, OverrideResponse};
