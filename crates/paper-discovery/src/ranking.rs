//! Relevance scoring and ranking of candidates.
//!
//! Scores are only meaningful relative to each other within one request, so
//! there is no normalization.

use std::collections::HashSet;
use std::ops::RangeInclusive;

use crate::models::Candidate;

/// Venues and publishers that earn the venue bonus.
pub const PREFERRED_VENUES: &[&str] =
    &["IEEE", "ACM", "Springer", "Elsevier", "USENIX", "NDSS", "CCS", "WWW", "ICSE", "SOSP"];

/// Scoring weights and thresholds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringConfig {
    /// Bonus for a preferred venue.
    pub venue_bonus: i32,

    /// Papers from this year on earn the recency bonus.
    pub recent_year: i32,

    /// Bonus for recent papers.
    pub recency_bonus: i32,

    /// Bonus for a direct link.
    pub direct_link_bonus: i32,

    /// Abstracts longer than this earn the abstract bonus.
    pub long_abstract_chars: usize,

    /// Bonus for a long abstract.
    pub long_abstract_bonus: i32,

    /// Reference counts in this range suggest a paper of moderate length.
    pub reference_range: RangeInclusive<i32>,

    /// Bonus for a reference count inside `reference_range`.
    pub reference_bonus: i32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            venue_bonus: 10,
            recent_year: 2019,
            recency_bonus: 5,
            direct_link_bonus: 3,
            long_abstract_chars: 300,
            long_abstract_bonus: 2,
            reference_range: 10..=60,
            reference_bonus: 2,
        }
    }
}

impl ScoringConfig {
    /// Score a single candidate. Pure: same input, same score.
    #[must_use]
    pub fn score(&self, candidate: &Candidate) -> i32 {
        let record = &candidate.record;
        let mut score = 0;

        if is_preferred_venue(&record.venue) {
            score += self.venue_bonus;
        }
        if record.year >= self.recent_year {
            score += self.recency_bonus;
        }
        if candidate.direct_link && record.url.starts_with("http") {
            score += self.direct_link_bonus;
        }
        if record.r#abstract.chars().count() > self.long_abstract_chars {
            score += self.long_abstract_bonus;
        }
        // Only the primary provider reports reference counts.
        if candidate.reference_count.is_some_and(|n| self.reference_range.contains(&n)) {
            score += self.reference_bonus;
        }

        score
    }

    /// Score every candidate and stable-sort by descending score.
    ///
    /// Equal scores keep provider order.
    #[must_use]
    pub fn rank(&self, mut candidates: Vec<Candidate>) -> Vec<Candidate> {
        for candidate in &mut candidates {
            candidate.score = self.score(candidate);
        }
        candidates.sort_by(|a, b| b.score.cmp(&a.score));
        candidates
    }
}

/// Case-insensitive substring match against [`PREFERRED_VENUES`].
#[must_use]
pub fn is_preferred_venue(venue: &str) -> bool {
    let venue = venue.to_uppercase();
    PREFERRED_VENUES.iter().any(|v| venue.contains(&v.to_uppercase()))
}

/// Take up to `limit` candidates in order, skipping titles already in `seen`.
///
/// Selected titles are added to `seen`, so repeated calls share one dedup set.
#[must_use]
pub fn take_unique(
    ranked: Vec<Candidate>,
    seen: &mut HashSet<String>,
    limit: usize,
) -> Vec<Candidate> {
    let mut selected = Vec::with_capacity(limit.min(ranked.len()));
    for candidate in ranked {
        if selected.len() >= limit {
            break;
        }
        if seen.insert(candidate.record.title_key()) {
            selected.push(candidate);
        }
    }
    selected
}
