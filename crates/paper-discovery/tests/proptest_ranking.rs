//! Property-based tests for ranking and the discovery invariants.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use proptest::prelude::*;

use paper_discovery::client::PaperSource;
use paper_discovery::error::ClientResult;
use paper_discovery::models::{Candidate, PaperRecord, normalize_title, reconstruct_abstract};
use paper_discovery::ranking::{ScoringConfig, take_unique};
use paper_discovery::PaperDiscovery;

/// Generate candidates with a small title alphabet so duplicates are common.
fn arb_candidate() -> impl Strategy<Value = Candidate> {
    (
        prop_oneof!["[A-C]{1,2}", "[a-c]{1,2}", Just("  ".to_string())], // title
        0usize..400,                                                     // abstract length
        prop_oneof![Just("IEEE Access"), Just("ACM CCS"), Just("Nature"), Just("")], // venue
        1990i32..2030,                                                   // year
        proptest::option::of(0i32..200),                                 // reference_count
        any::<bool>(),                                                   // direct link
    )
        .prop_map(|(title, abstract_len, venue, year, references, direct)| {
            Candidate::new(PaperRecord {
                title,
                authors: vec![],
                r#abstract: "x".repeat(abstract_len),
                year,
                venue: venue.to_string(),
                url: "https://example.org/p".to_string(),
                source_id: None,
                doi: None,
            })
            .with_reference_count(references)
            .with_direct_link(direct)
        })
}

struct FixedSource(Vec<Candidate>);

#[async_trait::async_trait]
impl PaperSource for FixedSource {
    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn search(&self, _topic: &str, _limit: u32) -> ClientResult<Vec<Candidate>> {
        Ok(self.0.clone())
    }
}

fn run_discovery(primary: Vec<Candidate>, secondary: Vec<Candidate>) -> Vec<PaperRecord> {
    let discovery = PaperDiscovery::with_sources(
        Arc::new(FixedSource(primary)),
        Arc::new(FixedSource(secondary)),
        ScoringConfig::default(),
    );
    let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
    runtime.block_on(discovery.discover("property")).unwrap()
}

proptest! {
    /// Responses hold at most five unique, citable papers.
    #[test]
    fn discovery_output_invariants(
        primary in proptest::collection::vec(arb_candidate(), 0..25),
        secondary in proptest::collection::vec(arb_candidate(), 0..20),
    ) {
        let papers = run_discovery(primary, secondary);

        prop_assert!(papers.len() <= 5);

        let titles: HashSet<String> = papers.iter().map(|p| normalize_title(&p.title)).collect();
        prop_assert_eq!(titles.len(), papers.len());

        for paper in &papers {
            prop_assert!(!paper.title.trim().is_empty());
            prop_assert!(paper.r#abstract.chars().count() >= 100);
        }
    }

    /// Scoring is a pure function of the candidate.
    #[test]
    fn score_is_deterministic(candidate in arb_candidate()) {
        let scoring = ScoringConfig::default();
        prop_assert_eq!(scoring.score(&candidate), scoring.score(&candidate.clone()));
    }

    /// Ranking sorts by descending score and keeps input order among ties.
    #[test]
    fn rank_is_stable_descending(
        candidates in proptest::collection::vec(arb_candidate(), 0..30),
    ) {
        let indexed: Vec<Candidate> = candidates
            .into_iter()
            .enumerate()
            .map(|(i, mut c)| {
                c.record.source_id = Some(i.to_string());
                c
            })
            .collect();

        let ranked = ScoringConfig::default().rank(indexed);

        for pair in ranked.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                let a: usize = pair[0].record.source_id.as_deref().unwrap().parse().unwrap();
                let b: usize = pair[1].record.source_id.as_deref().unwrap().parse().unwrap();
                prop_assert!(a < b);
            }
        }
    }

    /// Taking unique candidates never exceeds the limit or repeats a title.
    #[test]
    fn take_unique_respects_limit(
        candidates in proptest::collection::vec(arb_candidate(), 0..30),
        limit in 0usize..8,
    ) {
        let mut seen = HashSet::new();
        let taken = take_unique(candidates, &mut seen, limit);

        prop_assert!(taken.len() <= limit);
        let keys: HashSet<String> = taken.iter().map(|c| c.record.title_key()).collect();
        prop_assert_eq!(keys.len(), taken.len());
        prop_assert!(keys.is_subset(&seen));
    }

    /// Every listed position is filled and the word count matches.
    #[test]
    fn reconstruct_abstract_places_every_word(
        words in proptest::collection::vec("[a-z]{1,8}", 0..40),
    ) {
        let mut index: HashMap<String, Vec<usize>> = HashMap::new();
        for (pos, word) in words.iter().enumerate() {
            index.entry(word.clone()).or_default().push(pos);
        }

        prop_assert_eq!(reconstruct_abstract(&index), words.join(" "));
    }
}
