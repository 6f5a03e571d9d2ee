// ABOUTME: Retry policy and executor wrapping single-attempt generation calls
// ABOUTME: Exponential backoff on throttling, fixed delay on other retryable failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Retry orchestration around a [`GenerationProvider`].
//!
//! The backoff math lives here, separate from transport concerns: the
//! provider classifies failures into [`crate::errors::ErrorCode`]s, and this
//! module decides whether and when the next attempt fires. Every attempt
//! consumes one pacer slot, so retries are rate limited like fresh calls.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use super::{GenerationProvider, RequestPacer};
use crate::errors::AppResult;

/// Retry configuration
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Base delay for exponential backoff on throttling responses
    pub throttle_base_delay: Duration,
    /// Fixed delay before retrying non-throttling failures
    pub retry_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            throttle_base_delay: Duration::from_secs(2),
            retry_delay: Duration::from_millis(1500),
        }
    }
}

impl RetryPolicy {
    /// Delay before the attempt following failed attempt `attempt` (1-based)
    ///
    /// Throttling waits `2^attempt * base`; other retryable failures wait
    /// the fixed delay.
    #[must_use]
    pub fn delay_after(&self, attempt: u32, throttling: bool) -> Duration {
        if throttling {
            self.throttle_base_delay * 2u32.saturating_pow(attempt)
        } else {
            self.retry_delay
        }
    }
}

/// Executes generation calls under the retry policy and request pacer
pub struct RetryExecutor {
    provider: Arc<dyn GenerationProvider>,
    pacer: RequestPacer,
    policy: RetryPolicy,
}

impl RetryExecutor {
    /// Create an executor around a provider
    #[must_use]
    pub fn new(provider: Arc<dyn GenerationProvider>, pacer: RequestPacer, policy: RetryPolicy) -> Self {
        Self {
            provider,
            pacer,
            policy,
        }
    }

    /// Call the provider, retrying per policy
    ///
    /// # Errors
    ///
    /// Propagates the final classified error unmodified once the attempt
    /// ceiling is reached, and immediately for non-retryable failures.
    pub async fn call(&self, prompt: &str) -> AppResult<String> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            self.pacer.acquire().await;

            match self.provider.generate(prompt).await {
                Ok(text) => {
                    debug!(provider = self.provider.name(), attempt, "generation succeeded");
                    return Ok(text);
                }
                Err(error) => {
                    let retryable = error.code.is_retryable();
                    if !retryable || attempt >= self.policy.max_attempts {
                        warn!(
                            provider = self.provider.name(),
                            attempt,
                            code = ?error.code,
                            retryable,
                            "generation failed, giving up"
                        );
                        return Err(error);
                    }

                    let delay = self.policy.delay_after(attempt, error.code.is_throttling());
                    warn!(
                        provider = self.provider.name(),
                        attempt,
                        code = ?error.code,
                        delay_ms = delay.as_millis() as u64,
                        "generation failed, retrying"
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_throttle_backoff_doubles() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_after(1, true), Duration::from_secs(4));
        assert_eq!(policy.delay_after(2, true), Duration::from_secs(8));
    }

    #[test]
    fn test_non_throttle_delay_is_fixed() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_after(1, false), policy.retry_delay);
        assert_eq!(policy.delay_after(2, false), policy.retry_delay);
    }
}
