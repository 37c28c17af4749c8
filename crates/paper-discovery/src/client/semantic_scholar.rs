//! Semantic Scholar adapter (primary provider).

use std::sync::Arc;
use std::time::Duration;

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest_middleware::ClientWithMiddleware;

use super::{PaperSource, build_http_client, current_year, read_json};
use crate::config::{Config, search};
use crate::error::ClientResult;
use crate::models::{Candidate, S2SearchResponse};

/// Semantic Scholar Graph API search adapter.
#[derive(Clone)]
pub struct SemanticScholarSource {
    /// HTTP client with backoff middleware.
    client: ClientWithMiddleware,

    /// Graph API base URL.
    base_url: String,

    /// Process-wide throttle; `None` when no spacing is configured.
    limiter: Option<Arc<DefaultDirectRateLimiter>>,

    /// API key present.
    has_api_key: bool,
}

impl SemanticScholarSource {
    /// Create the adapter from service configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the API key is not a valid header value or the HTTP
    /// client cannot be built.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(ref key) = config.api_key {
            headers.insert("x-api-key", HeaderValue::from_str(key)?);
        }

        let client = build_http_client(
            headers,
            config.primary_timeout,
            config.connect_timeout,
            Some(config.retry_policy.clone()),
        )?;

        Ok(Self {
            client,
            base_url: config.primary_endpoint.trim_end_matches('/').to_string(),
            limiter: rate_limiter(config.rate_limit_delay),
            has_api_key: config.api_key.is_some(),
        })
    }

    /// Check if an API key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.has_api_key
    }

    /// Query string sent for a topic.
    #[must_use]
    pub fn query_for(topic: &str) -> String {
        format!("{} {}", topic.trim(), search::PRIMARY_QUERY_SUFFIX)
    }

    /// Raw search call.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, a non-success status after retries,
    /// or a malformed body.
    pub async fn search_raw(&self, query: &str, limit: u32) -> ClientResult<S2SearchResponse> {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }

        let url = format!("{}/paper/search", self.base_url);
        let params = [
            ("query", query.to_string()),
            ("limit", limit.to_string()),
            ("fields", search::SEMANTIC_SCHOLAR_FIELDS.join(",")),
        ];

        let response = self.client.get(&url).query(&params).send().await?;
        read_json(response).await
    }
}

fn rate_limiter(spacing: Duration) -> Option<Arc<DefaultDirectRateLimiter>> {
    Quota::with_period(spacing).map(|quota| Arc::new(RateLimiter::direct(quota)))
}

#[async_trait::async_trait]
impl PaperSource for SemanticScholarSource {
    fn name(&self) -> &'static str {
        "semantic_scholar"
    }

    async fn search(&self, topic: &str, limit: u32) -> ClientResult<Vec<Candidate>> {
        let query = Self::query_for(topic);
        let result = self.search_raw(&query, limit).await?;
        let year = current_year();

        let fetched = result.data.len();
        let candidates: Vec<Candidate> = result
            .data
            .into_iter()
            .map(|paper| paper.into_candidate(year))
            .filter(|c| c.record.is_citable())
            .collect();

        tracing::debug!(
            source = self.name(),
            fetched,
            usable = candidates.len(),
            "Semantic Scholar search complete"
        );
        Ok(candidates)
    }
}

impl std::fmt::Debug for SemanticScholarSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SemanticScholarSource")
            .field("base_url", &self.base_url)
            .field("has_api_key", &self.has_api_key)
            .finish()
    }
}
