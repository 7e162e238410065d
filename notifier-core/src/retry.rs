//! Exponential backoff around any failable async operation.

use std::future::Future;
use std::time::Duration;

use crate::error::Retryable;

/// Backoff parameters. The process-wide values come from [`RetryConfig::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    /// Retries after the first attempt; total attempts = `max_retries + 1`.
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(10_000),
            backoff_multiplier: 2,
        }
    }
}

impl RetryConfig {
    /// Delay before retry number `attempt` (0-based), capped at `max_delay`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let factor = self.backoff_multiplier.saturating_pow(attempt);
        self.initial_delay.saturating_mul(factor).min(self.max_delay)
    }

    /// Runs `operation` until it succeeds, fails terminally, or the attempt
    /// budget is spent. The last error is returned as-is.
    ///
    /// The operation is re-invoked verbatim on every attempt, so it must be
    /// safe to repeat.
    pub async fn run<T, E, F, Fut>(&self, label: &str, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Retryable,
    {
        let mut attempt = 0;
        loop {
            let err = match operation().await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };

            if attempt >= self.max_retries || !err.is_retryable() {
                return Err(err);
            }

            let delay = self.delay_for_attempt(attempt);
            let delay_ms = delay.as_millis() as u64;
            tracing::warn!(
                attempt = attempt + 1,
                max_retries = self.max_retries,
                delay_ms,
                "{label} failed, retrying in {delay_ms}ms"
            );

            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

/// [`RetryConfig::run`] with the process-wide defaults.
pub async fn retry_with_backoff<T, E, F, Fut>(label: &str, operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Retryable,
{
    RetryConfig::default().run(label, operation).await
}
