//! Retry wrapper for transient generator failures.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use quizforge_core::traits::QuestionGenerator;

use crate::error::ProviderError;

const MAX_RETRY_DELAY: Duration = Duration::from_secs(60);

/// Retries the wrapped generator with exponential backoff.
///
/// Permanent [`ProviderError`]s are returned immediately, and a backend's
/// retry-after hint replaces the current delay.
pub struct RetryingGenerator {
    inner: Arc<dyn QuestionGenerator>,
    max_retries: u32,
    retry_delay: Duration,
}

impl RetryingGenerator {
    pub fn new(inner: Arc<dyn QuestionGenerator>, max_retries: u32, retry_delay: Duration) -> Self {
        Self {
            inner,
            max_retries,
            retry_delay,
        }
    }
}

#[async_trait]
impl QuestionGenerator for RetryingGenerator {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn generate(&self, highlighted: &str) -> anyhow::Result<String> {
        let mut retry_delay = self.retry_delay;
        let mut attempt = 0;
        loop {
            let err = match self.inner.generate(highlighted).await {
                Ok(question) => return Ok(question),
                Err(e) => e,
            };

            let provider_err = err.downcast_ref::<ProviderError>();
            if provider_err.is_some_and(ProviderError::is_permanent) || attempt >= self.max_retries
            {
                return Err(err);
            }
            if let Some(ms) = provider_err.and_then(ProviderError::retry_after_ms) {
                retry_delay = Duration::from_millis(ms);
            }

            attempt += 1;
            tracing::warn!(
                generator = self.inner.name(),
                attempt,
                delay_ms = retry_delay.as_millis() as u64,
                "retrying after error: {err}"
            );
            tokio::time::sleep(retry_delay).await;
            retry_delay = (retry_delay * 2).min(MAX_RETRY_DELAY);
        }
    }
}
