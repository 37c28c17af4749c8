//! Fallback orchestrator: primary search, top-up from the secondary, dedup.
//!
//! One request runs sequentially through three stages:
//!
//! 1. **Primary only**: search the primary provider, rank, keep the top 5.
//!    A failed primary counts as zero candidates.
//! 2. **Topping up**: only when fewer than 5 were kept. Search the secondary
//!    provider, drop titles already kept, rank, append enough to reach 5.
//! 3. **Done**: strip ranking fields and return 0-5 records.
//!
//! Only the failure of *both* providers is an error. A short or empty result
//! from providers that did respond is a successful answer.
//!
//! With a cache configured, results are memoized per normalized topic and
//! concurrent requests for the same topic share a single in-flight search.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

use crate::client::{OpenAlexSource, PaperSource, SemanticScholarSource};
use crate::config::{Config, search};
use crate::error::{DiscoveryError, DiscoveryResult};
use crate::models::{Candidate, PaperRecord};
use crate::ranking::{ScoringConfig, take_unique};

/// Paper discovery service.
#[derive(Clone)]
pub struct PaperDiscovery {
    primary: Arc<dyn PaperSource>,
    secondary: Arc<dyn PaperSource>,
    scoring: ScoringConfig,
    cache: Option<Cache<String, Arc<Vec<PaperRecord>>>>,
}

impl PaperDiscovery {
    /// Build the service with the real Semantic Scholar and OpenAlex adapters.
    ///
    /// # Errors
    ///
    /// Returns error if either HTTP client cannot be built.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let primary = Arc::new(SemanticScholarSource::new(config)?);
        let secondary = Arc::new(OpenAlexSource::new(config)?);

        let mut discovery = Self::with_sources(primary, secondary, config.scoring.clone());
        if config.cache_enabled() {
            discovery = discovery.with_cache(config.cache_ttl, config.cache_max_size);
        }
        Ok(discovery)
    }

    /// Build the service around arbitrary sources (no cache).
    #[must_use]
    pub fn with_sources(
        primary: Arc<dyn PaperSource>,
        secondary: Arc<dyn PaperSource>,
        scoring: ScoringConfig,
    ) -> Self {
        Self { primary, secondary, scoring, cache: None }
    }

    /// Enable the topic cache.
    #[must_use]
    pub fn with_cache(mut self, ttl: Duration, max_capacity: u64) -> Self {
        self.cache = Some(Cache::builder().max_capacity(max_capacity).time_to_live(ttl).build());
        self
    }

    /// Whether results are cached.
    #[must_use]
    pub const fn is_cached(&self) -> bool {
        self.cache.is_some()
    }

    /// Find up to 5 ranked, deduplicated papers for `topic`.
    ///
    /// # Errors
    ///
    /// - [`DiscoveryError::InvalidInput`] if the topic is blank; no provider is called.
    /// - [`DiscoveryError::TotalUnavailable`] if both providers failed.
    pub async fn discover(&self, topic: &str) -> DiscoveryResult<Vec<PaperRecord>> {
        let topic = validate_topic(topic)?;

        let Some(cache) = &self.cache else {
            return self.search_uncached(topic).await;
        };

        let key = normalize_topic(topic);
        cache
            .try_get_with(key, async { self.search_uncached(topic).await.map(Arc::new) })
            .await
            .map(|papers| papers.as_ref().clone())
            .map_err(|e| e.as_ref().clone())
    }

    #[tracing::instrument(skip(self))]
    async fn search_uncached(&self, topic: &str) -> DiscoveryResult<Vec<PaperRecord>> {
        let limit = search::RESULT_LIMIT;
        let mut seen = HashSet::new();

        let (mut selected, primary_error) =
            match self.primary.search(topic, search::PRIMARY_CANDIDATES).await {
                Ok(candidates) => {
                    tracing::info!(count = candidates.len(), "Primary search returned candidates");
                    (self.select(candidates, &mut seen, limit), None)
                }
                Err(e) => {
                    let retryable = e.is_retryable();
                    let err = DiscoveryError::source_unavailable(self.primary.name(), e.to_string());
                    tracing::warn!(error = %err, retryable, "Primary source failed, falling back");
                    (Vec::new(), Some(err))
                }
            };

        if selected.len() < limit {
            tracing::info!(have = selected.len(), "Topping up from secondary source");

            match self.secondary.search(topic, search::SECONDARY_CANDIDATES).await {
                Ok(candidates) => {
                    let fresh: Vec<Candidate> = candidates
                        .into_iter()
                        .filter(|c| !seen.contains(&c.record.title_key()))
                        .collect();
                    let missing = limit - selected.len();
                    selected.extend(self.select(fresh, &mut seen, missing));
                }
                Err(e) => {
                    let err =
                        DiscoveryError::source_unavailable(self.secondary.name(), e.to_string());
                    tracing::warn!(error = %err, "Secondary source failed");
                    if primary_error.is_some() {
                        return Err(DiscoveryError::TotalUnavailable(err.to_string()));
                    }
                }
            }
        }

        tracing::info!(count = selected.len(), "Returning papers");
        Ok(selected.into_iter().map(Candidate::into_record).collect())
    }

    /// Filter, rank and take up to `limit` unseen candidates.
    fn select(
        &self,
        candidates: Vec<Candidate>,
        seen: &mut HashSet<String>,
        limit: usize,
    ) -> Vec<Candidate> {
        let citable = candidates.into_iter().filter(|c| c.record.is_citable()).collect();
        take_unique(self.scoring.rank(citable), seen, limit)
    }
}

impl std::fmt::Debug for PaperDiscovery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaperDiscovery")
            .field("primary", &self.primary.name())
            .field("secondary", &self.secondary.name())
            .field("cached", &self.is_cached())
            .finish()
    }
}

/// Reject blank topics; return the trimmed topic.
pub fn validate_topic(topic: &str) -> DiscoveryResult<&str> {
    let topic = topic.trim();
    if topic.is_empty() {
        return Err(DiscoveryError::invalid_input("topic", "Topic is required"));
    }
    Ok(topic)
}

/// Cache key for a topic: lower-cased with whitespace collapsed.
#[must_use]
pub fn normalize_topic(topic: &str) -> String {
    topic.split_whitespace().map(str::to_lowercase).collect::<Vec<_>>().join(" ")
}
