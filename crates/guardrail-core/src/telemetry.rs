//! Tracing setup for binaries and tests.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber, filtered via `GUARDRAIL_LOG`
/// (default "info"). Safe to call more than once — later calls are
/// no-ops.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("GUARDRAIL_LOG")
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let spec = filter.to_string();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
    tracing::debug!(filter = %spec, "tracing initialized");
}
