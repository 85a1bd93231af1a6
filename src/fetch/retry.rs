// Retry policy with exponential backoff.
// All fetch-layer failures are retried uniformly; a rate-limited response
// shortens the sleep to the reset instant when that comes sooner.

use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::FetchConfig;
use crate::error::{GitfolioError, Result};

/// Retry policy for the resilient fetcher.
///
/// Backoff between attempt `i` and `i + 1` is `base * 2^(i-1)`, capped at
/// `max_backoff`. `retry_count` is the total number of attempts.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub retry_count: u32,
    pub base_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retry_count: 3,
            base_backoff: Duration::from_millis(1_000),
            max_backoff: Duration::from_millis(30_000),
        }
    }
}

impl RetryPolicy {
    pub fn from_config(config: &FetchConfig) -> Self {
        Self {
            retry_count: config.retry_count,
            base_backoff: Duration::from_millis(config.base_backoff_ms),
            max_backoff: Duration::from_millis(config.max_backoff_ms),
        }
    }

    /// Run an operation up to `retry_count` times, sleeping between attempts.
    /// Returns the last error once attempts are exhausted.
    pub async fn run<F, Fut, T>(&self, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut last_err: Option<GitfolioError> = None;

        for attempt in 1..=self.retry_count {
            match operation().await {
                Ok(value) => {
                    if attempt > 1 {
                        debug!(attempt, "succeeded after retries");
                    }
                    return Ok(value);
                }
                Err(err) => {
                    if !err.is_retryable() {
                        return Err(err);
                    }
                    if attempt < self.retry_count {
                        let delay = self.delay_after(attempt, &err);
                        warn!(
                            attempt,
                            total = self.retry_count,
                            delay_ms = delay.as_millis() as u64,
                            error = %err,
                            "attempt failed, retrying"
                        );
                        sleep(delay).await;
                    }
                    last_err = Some(err);
                }
            }
        }

        Err(last_err.unwrap_or(GitfolioError::CacheMiss))
    }

    /// Backoff delay following attempt `attempt` (1-based).
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let factor = 2_u32.saturating_pow(attempt.saturating_sub(1));
        self.base_backoff.saturating_mul(factor).min(self.max_backoff)
    }

    /// Delay before the next attempt. For rate-limited responses the sleep is
    /// shortened to the reset instant when that is sooner than the backoff.
    fn delay_after(&self, attempt: u32, err: &GitfolioError) -> Duration {
        let backoff = self.backoff_for(attempt);
        if let GitfolioError::RateLimited { reset_at } = err {
            let until_reset = reset_at
                .signed_duration_since(Utc::now())
                .to_std()
                .unwrap_or(Duration::ZERO);
            if until_reset < backoff {
                return until_reset;
            }
        }
        backoff
    }
}
