//! Data model: violations, rules, scan request/response, audit ledger
//! records, and aggregate stats.

pub mod audit;
pub mod rules;
pub mod scan;
pub mod stats;
pub mod violation;
