//! Configuration for the paper discovery service.

use std::time::Duration;

use crate::client::retry::RetryPolicy;
use crate::ranking::ScoringConfig;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// Semantic Scholar Graph API endpoint.
    pub const SEMANTIC_SCHOLAR_API: &str = "https://api.semanticscholar.org/graph/v1";

    /// OpenAlex API endpoint.
    pub const OPENALEX_API: &str = "https://api.openalex.org";

    /// Landing page prefix for Semantic Scholar papers.
    pub const SEMANTIC_SCHOLAR_PAPER_PAGE: &str = "https://www.semanticscholar.org/paper";

    /// User agent sent to both providers.
    pub const USER_AGENT: &str = concat!("paper-discovery/", env!("CARGO_PKG_VERSION"));

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Rate limit delay between Semantic Scholar requests without API key (1 req/s).
    pub const RATE_LIMIT_DELAY: Duration = Duration::from_secs(1);

    /// Rate limit delay between Semantic Scholar requests with API key (10 req/s).
    pub const RATE_LIMIT_DELAY_WITH_KEY: Duration = Duration::from_millis(100);

    /// Cache TTL (5 minutes).
    pub const CACHE_TTL: Duration = Duration::from_secs(300);

    /// Maximum cached topics.
    pub const CACHE_MAX_SIZE: u64 = 1000;

    /// Maximum keepalive connections per host.
    pub const MAX_KEEPALIVE: usize = 10;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);
}

/// Search sizing and query shaping.
pub mod search {
    /// Papers returned per request.
    pub const RESULT_LIMIT: usize = 5;

    /// Minimum abstract length (characters) for a candidate to be considered.
    pub const MIN_ABSTRACT_CHARS: usize = 100;

    /// Candidates requested from the primary provider.
    pub const PRIMARY_CANDIDATES: u32 = 20;

    /// Candidates requested from the secondary provider.
    pub const SECONDARY_CANDIDATES: u32 = 15;

    /// Keywords appended to the topic for the primary provider.
    pub const PRIMARY_QUERY_SUFFIX: &str = "computing technology";

    /// Keywords appended to the topic for the secondary provider.
    pub const SECONDARY_QUERY_SUFFIX: &str = "computing";

    /// Placeholder venue for records whose provider gives none.
    pub const DEFAULT_VENUE: &str = "Unknown Venue";

    /// Fields requested from Semantic Scholar.
    pub const SEMANTIC_SCHOLAR_FIELDS: &[&str] = &[
        "title",
        "authors",
        "abstract",
        "year",
        "venue",
        "externalIds",
        "openAccessPdf",
        "referenceCount",
        "publicationTypes",
        "publicationDate",
    ];
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Semantic Scholar API key (optional).
    pub api_key: Option<String>,

    /// Contact address for the OpenAlex polite pool (optional).
    pub openalex_mailto: Option<String>,

    /// Base URL for the primary provider (for testing with mock servers).
    pub primary_endpoint: String,

    /// Base URL for the secondary provider (for testing with mock servers).
    pub secondary_endpoint: String,

    /// Request timeout for the primary provider.
    pub primary_timeout: Duration,

    /// Request timeout for the secondary provider.
    pub secondary_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Minimum spacing between primary provider requests.
    pub rate_limit_delay: Duration,

    /// Backoff policy for the primary provider.
    pub retry_policy: RetryPolicy,

    /// Relevance scoring weights and thresholds.
    pub scoring: ScoringConfig,

    /// Topic cache TTL (zero disables the cache).
    pub cache_ttl: Duration,

    /// Maximum cached topics.
    pub cache_max_size: u64,
}

impl Config {
    /// Create a new configuration.
    ///
    /// The primary provider is throttled harder when no API key is present.
    #[must_use]
    pub fn new(api_key: Option<String>, openalex_mailto: Option<String>) -> Self {
        let rate_limit_delay = if api_key.is_some() {
            api::RATE_LIMIT_DELAY_WITH_KEY
        } else {
            api::RATE_LIMIT_DELAY
        };

        Self {
            api_key,
            openalex_mailto,
            primary_endpoint: api::SEMANTIC_SCHOLAR_API.to_string(),
            secondary_endpoint: api::OPENALEX_API.to_string(),
            primary_timeout: api::REQUEST_TIMEOUT,
            secondary_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            rate_limit_delay,
            retry_policy: RetryPolicy::default(),
            scoring: ScoringConfig::default(),
            cache_ttl: api::CACHE_TTL,
            cache_max_size: api::CACHE_MAX_SIZE,
        }
    }

    /// Create a test configuration pointing both providers at a mock server.
    ///
    /// Semantic Scholar is served under `/graph/v1`, OpenAlex under `/openalex`.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            api_key: None,
            openalex_mailto: None,
            primary_endpoint: format!("{}/graph/v1", base_url),
            secondary_endpoint: format!("{}/openalex", base_url),
            primary_timeout: Duration::from_secs(5),
            secondary_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            rate_limit_delay: Duration::ZERO, // No throttling in tests
            retry_policy: RetryPolicy::immediate(3),
            scoring: ScoringConfig::default(),
            cache_ttl: Duration::ZERO, // No caching in tests
            cache_max_size: 0,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns error if environment variables are invalid.
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = non_empty_var("SEMANTIC_SCHOLAR_API_KEY");
        let mailto = non_empty_var("OPENALEX_MAILTO");
        Self::new(api_key, mailto).with_env_overrides()
    }

    /// Apply endpoint and cache overrides from the environment.
    ///
    /// Reads `SEMANTIC_SCHOLAR_API_URL`, `OPENALEX_API_URL` and
    /// `PAPER_CACHE_TTL_SECS`.
    ///
    /// # Errors
    ///
    /// Returns error if `PAPER_CACHE_TTL_SECS` is not a number.
    pub fn with_env_overrides(mut self) -> anyhow::Result<Self> {
        if let Some(url) = non_empty_var("SEMANTIC_SCHOLAR_API_URL") {
            self.primary_endpoint = url;
        }
        if let Some(url) = non_empty_var("OPENALEX_API_URL") {
            self.secondary_endpoint = url;
        }
        if let Some(secs) = non_empty_var("PAPER_CACHE_TTL_SECS") {
            self.cache_ttl = Duration::from_secs(secs.parse()?);
        }
        Ok(self)
    }

    /// Check if an API key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Whether the topic cache is enabled.
    #[must_use]
    pub fn cache_enabled(&self) -> bool {
        !self.cache_ttl.is_zero() && self.cache_max_size > 0
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None, None)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
