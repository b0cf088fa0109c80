//! Shared classifier admission limiter.
//!
//! One process-lifetime instance bounds in-flight classifier calls
//! across all concurrently active requests — even when five webhooks
//! land at once, every classifier call queues behind the same gate.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{AcquireError, OwnedSemaphorePermit, Semaphore};

use guardrail_core::config::GuardrailConfig;

/// Bounded-concurrency resource with a fixed pacing delay, applied while
/// holding an admission slot to smooth bursts under a requests-per-minute
/// ceiling. Inject one `Arc<AdmissionLimiter>` into every orchestrator.
pub struct AdmissionLimiter {
    semaphore: Arc<Semaphore>,
    pace: Duration,
}

impl AdmissionLimiter {
    pub fn new(max_in_flight: usize, pace: Duration) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(max_in_flight.max(1))),
            pace,
        }
    }

    pub fn from_config(config: &GuardrailConfig) -> Self {
        Self::new(
            config.effective_classifier_max_in_flight(),
            config.effective_classifier_pace(),
        )
    }

    /// Wait for an admission slot, then pace before handing it out.
    /// The returned permit must be held for the duration of the
    /// classifier call.
    pub async fn admit(&self) -> Result<OwnedSemaphorePermit, AcquireError> {
        let permit = Arc::clone(&self.semaphore).acquire_owned().await?;
        if !self.pace.is_zero() {
            tokio::time::sleep(self.pace).await;
        }
        Ok(permit)
    }

    /// Currently available slots — observability only.
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }
}
