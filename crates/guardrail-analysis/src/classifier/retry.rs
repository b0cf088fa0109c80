//! Retry decorator — the classifier's internal retry/backoff budget.

use std::time::Duration;

use guardrail_core::errors::ClassifierError;

use super::{Classifier, ClassifierFinding, ClassifierInput};

/// Wraps any classifier with bounded exponential backoff. After the
/// budget is spent the caller sees a single `Exhausted` error carrying
/// the last underlying failure.
pub struct Retrying<C> {
    inner: C,
    max_attempts: u32,
    base_delay: Duration,
    max_delay: Duration,
}

impl<C> Retrying<C> {
    pub fn new(inner: C, max_attempts: u32) -> Self {
        Self {
            inner,
            max_attempts: max_attempts.max(1),
            base_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(60),
        }
    }

    pub fn with_delays(mut self, base: Duration, max: Duration) -> Self {
        self.base_delay = base;
        self.max_delay = max;
        self
    }
}

impl<C: Classifier> Classifier for Retrying<C> {
    async fn classify(
        &self,
        input: ClassifierInput,
    ) -> Result<Vec<ClassifierFinding>, ClassifierError> {
        let mut delay = self.base_delay;
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            match self.inner.classify(input.clone()).await {
                Ok(findings) => return Ok(findings),
                Err(e) if attempt >= self.max_attempts => {
                    return Err(ClassifierError::Exhausted {
                        attempts: attempt,
                        last: Box::new(e),
                    });
                }
                Err(e) => {
                    tracing::warn!(
                        filename = %input.filename,
                        attempt,
                        error = %e,
                        "classifier call failed; retrying"
                    );
                    tokio::time::sleep(delay).await;
                    delay = (delay * 2).min(self.max_delay);
                }
            }
        }
    }
}
