//! OpenAlex adapter (secondary provider).

use reqwest::header::HeaderMap;
use reqwest_middleware::ClientWithMiddleware;

use super::{PaperSource, build_http_client, current_year, read_json};
use crate::config::{Config, search};
use crate::error::ClientResult;
use crate::models::{Candidate, OaWorksResponse};

/// OpenAlex works search adapter. No retries: it is itself the fallback.
#[derive(Clone)]
pub struct OpenAlexSource {
    client: ClientWithMiddleware,
    base_url: String,
    mailto: Option<String>,
}

impl OpenAlexSource {
    /// Create the adapter from service configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = build_http_client(
            HeaderMap::new(),
            config.secondary_timeout,
            config.connect_timeout,
            None,
        )?;

        Ok(Self {
            client,
            base_url: config.secondary_endpoint.trim_end_matches('/').to_string(),
            mailto: config.openalex_mailto.clone(),
        })
    }

    /// Query string sent for a topic.
    #[must_use]
    pub fn query_for(topic: &str) -> String {
        format!("{} {}", topic.trim(), search::SECONDARY_QUERY_SUFFIX)
    }

    /// Raw works search, most-cited first, abstracts only.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, a non-success status, or a
    /// malformed body.
    pub async fn search_raw(&self, query: &str, limit: u32) -> ClientResult<OaWorksResponse> {
        let url = format!("{}/works", self.base_url);
        let mut params = vec![
            ("search", query.to_string()),
            ("filter", "has_abstract:true".to_string()),
            ("per-page", limit.to_string()),
            ("sort", "cited_by_count:desc".to_string()),
        ];
        if let Some(mailto) = &self.mailto {
            params.push(("mailto", mailto.clone()));
        }

        let response = self.client.get(&url).query(&params).send().await?;
        read_json(response).await
    }
}

#[async_trait::async_trait]
impl PaperSource for OpenAlexSource {
    fn name(&self) -> &'static str {
        "openalex"
    }

    async fn search(&self, topic: &str, limit: u32) -> ClientResult<Vec<Candidate>> {
        let query = Self::query_for(topic);
        let result = self.search_raw(&query, limit).await?;
        let year = current_year();

        let fetched = result.results.len();
        let candidates: Vec<Candidate> = result
            .results
            .into_iter()
            .map(|work| work.into_candidate(year))
            .filter(|c| c.record.is_citable())
            .collect();

        tracing::debug!(source = self.name(), fetched, usable = candidates.len(), "OpenAlex search complete");
        Ok(candidates)
    }
}

impl std::fmt::Debug for OpenAlexSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAlexSource")
            .field("base_url", &self.base_url)
            .field("has_mailto", &self.mailto.is_some())
            .finish()
    }
}
