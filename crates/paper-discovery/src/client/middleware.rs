//! Middleware for the provider HTTP clients.
//!
//! [`BackoffMiddleware`] plugs [`RetryPolicy`] into a `reqwest-middleware`
//! stack so adapters never see a retried-away response.

use http::Extensions;
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next};

use super::retry::{RetryPolicy, send_with_retry};

/// Retries 429 and 5xx responses with exponential backoff and jitter.
#[derive(Debug, Clone)]
pub struct BackoffMiddleware {
    policy: RetryPolicy,
}

impl BackoffMiddleware {
    /// Create a middleware driven by `policy`.
    #[must_use]
    pub const fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }
}

#[async_trait::async_trait]
impl Middleware for BackoffMiddleware {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        let extensions = &*extensions;
        send_with_retry(&self.policy, || {
            let attempt = req.try_clone();
            let next = next.clone();
            let mut extensions = extensions.clone();
            async move {
                let attempt = attempt.ok_or_else(|| {
                    reqwest_middleware::Error::Middleware(anyhow::anyhow!(
                        "request body cannot be cloned for retry"
                    ))
                })?;
                next.run(attempt, &mut extensions).await
            }
        })
        .await
    }
}
