//! Orchestrator tests with in-process fake sources.
//!
//! Fakes count their calls so fallback decisions can be asserted directly.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use paper_discovery::client::PaperSource;
use paper_discovery::error::{ClientError, ClientResult};
use paper_discovery::models::{Candidate, PaperRecord};
use paper_discovery::ranking::ScoringConfig;
use paper_discovery::{DiscoveryError, PaperDiscovery};

enum Behavior {
    Return(Vec<Candidate>),
    Fail,
}

struct FakeSource {
    name: &'static str,
    behavior: Behavior,
    delay: Duration,
    calls: AtomicU32,
}

impl FakeSource {
    fn returning(name: &'static str, candidates: Vec<Candidate>) -> Arc<Self> {
        Arc::new(Self {
            name,
            behavior: Behavior::Return(candidates),
            delay: Duration::ZERO,
            calls: AtomicU32::new(0),
        })
    }

    fn failing(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            behavior: Behavior::Fail,
            delay: Duration::ZERO,
            calls: AtomicU32::new(0),
        })
    }

    fn slow(name: &'static str, candidates: Vec<Candidate>, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            name,
            behavior: Behavior::Return(candidates),
            delay,
            calls: AtomicU32::new(0),
        })
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl PaperSource for FakeSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn search(&self, _topic: &str, limit: u32) -> ClientResult<Vec<Candidate>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.behavior {
            Behavior::Return(candidates) => {
                Ok(candidates.iter().take(limit as usize).cloned().collect())
            }
            Behavior::Fail => Err(ClientError::server(503, "unavailable")),
        }
    }
}

fn candidate(title: &str, venue: &str, year: i32) -> Candidate {
    Candidate::new(PaperRecord {
        title: title.to_string(),
        authors: vec!["Test Author".to_string()],
        r#abstract: "a".repeat(150),
        year,
        venue: venue.to_string(),
        url: format!("https://example.org/{}", title.replace(' ', "-")),
        source_id: None,
        doi: None,
    })
}

fn plain(n: usize, prefix: &str) -> Vec<Candidate> {
    (1..=n).map(|i| candidate(&format!("{prefix} {i}"), "Some Journal", 2010)).collect()
}

fn discovery(primary: &Arc<FakeSource>, secondary: &Arc<FakeSource>) -> PaperDiscovery {
    PaperDiscovery::with_sources(primary.clone(), secondary.clone(), ScoringConfig::default())
}

#[tokio::test]
async fn test_secondary_not_called_when_primary_sufficient() {
    let primary = FakeSource::returning("primary", plain(8, "Primary"));
    let secondary = FakeSource::returning("secondary", plain(3, "Secondary"));

    let papers = discovery(&primary, &secondary).discover("databases").await.unwrap();

    assert_eq!(papers.len(), 5);
    assert_eq!(primary.calls(), 1);
    assert_eq!(secondary.calls(), 0);
}

#[tokio::test]
async fn test_secondary_called_once_when_primary_short() {
    let primary = FakeSource::returning("primary", plain(2, "Primary"));
    let secondary = FakeSource::returning("secondary", plain(10, "Secondary"));

    let papers = discovery(&primary, &secondary).discover("databases").await.unwrap();

    assert_eq!(papers.len(), 5);
    assert_eq!(papers[0].title, "Primary 1");
    assert_eq!(papers[1].title, "Primary 2");
    assert_eq!(papers[2].title, "Secondary 1");
    assert_eq!(secondary.calls(), 1);
}

#[tokio::test]
async fn test_primary_candidates_outrank_better_secondary() {
    // Top-up only appends; a high-scoring secondary paper never displaces
    // an already selected primary one.
    let primary = FakeSource::returning("primary", plain(1, "Primary"));
    let secondary =
        FakeSource::returning("secondary", vec![candidate("Stellar", "IEEE S&P", 2024)]);

    let papers = discovery(&primary, &secondary).discover("security").await.unwrap();

    assert_eq!(papers[0].title, "Primary 1");
    assert_eq!(papers[1].title, "Stellar");
}

#[tokio::test]
async fn test_uncitable_candidates_filtered() {
    let mut short = candidate("Too Short", "IEEE", 2024);
    short.record.r#abstract = "brief".to_string();
    let mut untitled = candidate("", "IEEE", 2024);
    untitled.record.title = "   ".to_string();

    let primary = FakeSource::returning("primary", vec![short, untitled]);
    let secondary = FakeSource::returning("secondary", vec![]);

    let papers = discovery(&primary, &secondary).discover("filters").await.unwrap();
    assert!(papers.is_empty());
}

#[tokio::test]
async fn test_duplicate_titles_within_primary() {
    let primary = FakeSource::returning(
        "primary",
        vec![
            candidate("Same Paper", "IEEE", 2024),
            candidate("same paper", "Some Journal", 2010),
            candidate("Other Paper", "Some Journal", 2010),
        ],
    );
    let secondary = FakeSource::returning("secondary", vec![candidate(" SAME PAPER ", "ACM", 2024)]);

    let papers = discovery(&primary, &secondary).discover("dedup").await.unwrap();

    let titles: Vec<_> = papers.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Same Paper", "Other Paper"]);
}

#[tokio::test]
async fn test_primary_failure_falls_back() {
    let primary = FakeSource::failing("primary");
    let secondary = FakeSource::returning("secondary", plain(3, "Secondary"));

    let papers = discovery(&primary, &secondary).discover("fallback").await.unwrap();

    assert_eq!(papers.len(), 3);
    assert_eq!(primary.calls(), 1);
    assert_eq!(secondary.calls(), 1);
}

#[tokio::test]
async fn test_total_failure_reports_last_source() {
    let primary = FakeSource::failing("primary");
    let secondary = FakeSource::failing("secondary");

    let err = discovery(&primary, &secondary).discover("outage").await.unwrap_err();

    match err {
        DiscoveryError::TotalUnavailable(message) => {
            assert!(message.starts_with("secondary unavailable"), "got: {message}");
        }
        other => panic!("expected TotalUnavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_topic_calls_nothing() {
    let primary = FakeSource::returning("primary", plain(5, "Primary"));
    let secondary = FakeSource::returning("secondary", vec![]);

    let err = discovery(&primary, &secondary).discover("  ").await.unwrap_err();

    assert!(matches!(err, DiscoveryError::InvalidInput { .. }));
    assert_eq!(primary.calls(), 0);
    assert_eq!(secondary.calls(), 0);
}

#[tokio::test]
async fn test_cache_single_flight_for_concurrent_requests() {
    let primary =
        FakeSource::slow("primary", plain(5, "Primary"), Duration::from_millis(50));
    let secondary = FakeSource::returning("secondary", vec![]);
    let service = discovery(&primary, &secondary).with_cache(Duration::from_secs(60), 100);

    let requests = (0..8).map(|i| {
        let service = service.clone();
        let topic = if i % 2 == 0 { "Graph Neural Networks" } else { "graph  neural networks" };
        async move { service.discover(topic).await }
    });
    let results = futures::future::join_all(requests).await;

    assert!(results.iter().all(|r| r.as_ref().is_ok_and(|papers| papers.len() == 5)));
    assert_eq!(primary.calls(), 1);
}

#[tokio::test]
async fn test_cache_does_not_store_failures() {
    let primary = FakeSource::failing("primary");
    let secondary = FakeSource::failing("secondary");
    let service = discovery(&primary, &secondary).with_cache(Duration::from_secs(60), 100);

    assert!(service.discover("outage").await.is_err());
    assert!(service.discover("outage").await.is_err());
    assert_eq!(primary.calls(), 2);
}

#[tokio::test]
async fn test_uncached_service_searches_every_time() {
    let primary = FakeSource::returning("primary", plain(5, "Primary"));
    let secondary = FakeSource::returning("secondary", vec![]);
    let service = discovery(&primary, &secondary);

    service.discover("repeat").await.unwrap();
    service.discover("repeat").await.unwrap();
    assert_eq!(primary.calls(), 2);
}
