//! Retry policy with exponential backoff and jitter.
//!
//! The policy is independent of any provider: [`send_with_retry`] drives any
//! operation that yields a response with a status code.

use std::future::Future;
use std::time::Duration;

use rand::Rng;

/// When and how long to back off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt (total attempts = `max_retries + 1`).
    pub max_retries: u32,

    /// Delay before the first retry; doubles on each subsequent retry.
    pub base_delay: Duration,

    /// Upper bound of the uniform random jitter added to every delay.
    pub max_jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(500),
            max_jitter: Duration::from_millis(300),
        }
    }
}

impl RetryPolicy {
    /// A policy with no waiting between attempts.
    #[must_use]
    pub const fn immediate(max_retries: u32) -> Self {
        Self { max_retries, base_delay: Duration::ZERO, max_jitter: Duration::ZERO }
    }

    /// A policy that never retries.
    #[must_use]
    pub const fn none() -> Self {
        Self::immediate(0)
    }

    /// Total attempts including the first.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_retries + 1
    }

    /// Whether a response with this status should be retried.
    #[must_use]
    pub const fn is_retryable_status(status: u16) -> bool {
        status == 429 || status >= 500
    }

    /// Deterministic part of the delay before retry number `retry` (0-based).
    #[must_use]
    pub fn base_delay_for(&self, retry: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(retry))
    }

    /// Full delay before retry number `retry`, including random jitter.
    #[must_use]
    pub fn delay_for(&self, retry: u32) -> Duration {
        let jitter = if self.max_jitter.is_zero() {
            Duration::ZERO
        } else {
            rand::thread_rng().gen_range(Duration::ZERO..self.max_jitter)
        };
        self.base_delay_for(retry) + jitter
    }
}

/// A response the retry loop can inspect and discard.
#[async_trait::async_trait]
pub trait RetryableResponse: Send + Sized {
    /// HTTP status code.
    fn status_code(&self) -> u16;

    /// Consume the body so the underlying connection can be reused.
    async fn drain(self);
}

#[async_trait::async_trait]
impl RetryableResponse for reqwest::Response {
    fn status_code(&self) -> u16 {
        self.status().as_u16()
    }

    async fn drain(self) {
        if let Err(e) = self.bytes().await {
            tracing::debug!(error = %e, "Failed to drain retried response body");
        }
    }
}

/// Run `send` until it yields a non-retryable response or the policy is exhausted.
///
/// Errors from `send` are returned immediately. After the last attempt the
/// final response is returned as-is, even if it is a failure status.
pub async fn send_with_retry<R, E, F, Fut>(policy: &RetryPolicy, mut send: F) -> Result<R, E>
where
    R: RetryableResponse,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<R, E>>,
{
    let mut retry = 0;
    loop {
        let response = send().await?;
        let status = response.status_code();

        if !RetryPolicy::is_retryable_status(status) || retry >= policy.max_retries {
            return Ok(response);
        }

        let delay = policy.delay_for(retry);
        tracing::warn!(
            status,
            attempt = retry + 1,
            max_retries = policy.max_retries,
            delay_ms = delay.as_millis() as u64,
            "Retryable status, backing off"
        );

        response.drain().await;
        tokio::time::sleep(delay).await;
        retry += 1;
    }
}
