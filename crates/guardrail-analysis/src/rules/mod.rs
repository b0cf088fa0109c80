//! Rule loading and per-request resolution.

mod engine;

pub use engine::{ResolutionOrigin, RuleEngine, RuleResolution};
