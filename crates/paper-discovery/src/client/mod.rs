//! Paper provider clients.
//!
//! Each provider is an adapter behind [`PaperSource`]:
//! - [`SemanticScholarSource`]: primary, rate-limited, retried with backoff
//! - [`OpenAlexSource`]: secondary, used to top up short result sets
//!
//! Both share connection pooling and status handling from this module.

mod middleware;
mod openalex;
pub mod retry;
mod semantic_scholar;

use std::time::Duration;

use chrono::Datelike;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};

pub use middleware::BackoffMiddleware;
pub use openalex::OpenAlexSource;
pub use retry::{RetryPolicy, RetryableResponse, send_with_retry};
pub use semantic_scholar::SemanticScholarSource;

use crate::config::api;
use crate::error::{ClientError, ClientResult};
use crate::models::Candidate;

/// A searchable paper provider.
#[async_trait::async_trait]
pub trait PaperSource: Send + Sync {
    /// Stable provider name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Search for `topic`, requesting at most `limit` candidates.
    ///
    /// Returned candidates all satisfy [`crate::models::PaperRecord::is_citable`],
    /// in provider order.
    async fn search(&self, topic: &str, limit: u32) -> ClientResult<Vec<Candidate>>;
}

/// Build a pooled HTTP client, optionally wrapped in backoff middleware.
pub(crate) fn build_http_client(
    mut headers: HeaderMap,
    timeout: Duration,
    connect_timeout: Duration,
    retry_policy: Option<RetryPolicy>,
) -> anyhow::Result<ClientWithMiddleware> {
    headers.insert(USER_AGENT, HeaderValue::from_static(api::USER_AGENT));

    let client = Client::builder()
        .default_headers(headers)
        .timeout(timeout)
        .connect_timeout(connect_timeout)
        .pool_max_idle_per_host(api::MAX_KEEPALIVE)
        .pool_idle_timeout(api::KEEPALIVE_EXPIRY)
        .gzip(true)
        .build()?;

    let mut builder = ClientBuilder::new(client);
    if let Some(policy) = retry_policy {
        builder = builder.with(BackoffMiddleware::new(policy));
    }
    Ok(builder.build())
}

/// Read the full body and parse it, mapping non-success statuses to errors.
pub(crate) async fn read_json<T>(response: reqwest::Response) -> ClientResult<T>
where
    T: serde::de::DeserializeOwned,
{
    let status = response.status();

    if status.is_success() {
        let body = response.bytes().await?;
        return serde_json::from_slice(&body).map_err(ClientError::from);
    }

    match status.as_u16() {
        429 => {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(60);
            // Drain before dropping so the connection returns to the pool.
            let _ = response.bytes().await;
            Err(ClientError::rate_limited(retry_after))
        }
        500..=599 => {
            let text = response.text().await.unwrap_or_default();
            Err(ClientError::server(status.as_u16(), text))
        }
        _ => {
            let text = response.text().await.unwrap_or_default();
            Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text })
        }
    }
}

/// Year used when a provider omits the publication year.
pub(crate) fn current_year() -> i32 {
    chrono::Utc::now().year()
}
