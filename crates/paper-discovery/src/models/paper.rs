//! Canonical paper record returned to callers.

use serde::{Deserialize, Serialize};

use crate::config::search;

/// A citable paper, normalized from whichever provider produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperRecord {
    /// Paper title.
    pub title: String,

    /// Author display names in byline order.
    #[serde(default)]
    pub authors: Vec<String>,

    /// Plain-text abstract.
    #[serde(default)]
    pub r#abstract: String,

    /// Publication year.
    pub year: i32,

    /// Publication venue (journal or conference).
    pub venue: String,

    /// Direct open-access link when known, provider page otherwise.
    pub url: String,

    /// Provider-specific identifier.
    #[serde(default)]
    pub source_id: Option<String>,

    /// Digital Object Identifier.
    #[serde(default)]
    pub doi: Option<String>,
}

impl PaperRecord {
    /// Title key used for cross-source deduplication.
    #[must_use]
    pub fn title_key(&self) -> String {
        normalize_title(&self.title)
    }

    /// Whether this record may appear in a result set.
    #[must_use]
    pub fn is_citable(&self) -> bool {
        !self.title.trim().is_empty()
            && self.r#abstract.chars().count() >= search::MIN_ABSTRACT_CHARS
    }
}

/// Lower-cased, trimmed title.
#[must_use]
pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

/// A record plus the ranking signals that never leave the service.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// The record that will be returned.
    pub record: PaperRecord,

    /// Number of references, when the provider reports it.
    pub reference_count: Option<i32>,

    /// True when `record.url` points at the paper itself rather than a landing page.
    pub direct_link: bool,

    /// Relevance score, filled in by the ranker.
    pub score: i32,
}

impl Candidate {
    /// Wrap a record with no ranking signals.
    #[must_use]
    pub fn new(record: PaperRecord) -> Self {
        Self { record, reference_count: None, direct_link: false, score: 0 }
    }

    /// Builder-style reference count.
    #[must_use]
    pub fn with_reference_count(mut self, count: Option<i32>) -> Self {
        self.reference_count = count;
        self
    }

    /// Builder-style direct link flag.
    #[must_use]
    pub fn with_direct_link(mut self, direct: bool) -> Self {
        self.direct_link = direct;
        self
    }

    /// Drop the internal ranking fields.
    #[must_use]
    pub fn into_record(self) -> PaperRecord {
        self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, abstract_len: usize) -> PaperRecord {
        PaperRecord {
            title: title.to_string(),
            authors: vec!["Ada Lovelace".to_string()],
            r#abstract: "a".repeat(abstract_len),
            year: 2021,
            venue: "IEEE Access".to_string(),
            url: "https://example.org/paper.pdf".to_string(),
            source_id: Some("abc".to_string()),
            doi: None,
        }
    }

    #[test]
    fn test_normalize_title() {
        assert_eq!(normalize_title("  Quantum Error Correction "), "quantum error correction");
        assert_eq!(normalize_title("QUANTUM error Correction"), "quantum error correction");
    }

    #[test]
    fn test_is_citable_abstract_boundary() {
        assert!(record("Title", 100).is_citable());
        assert!(!record("Title", 99).is_citable());
    }

    #[test]
    fn test_is_citable_requires_title() {
        assert!(!record("   ", 500).is_citable());
    }

    #[test]
    fn test_abstract_length_counts_characters() {
        let mut r = record("Title", 0);
        r.r#abstract = "é".repeat(100);
        assert!(r.is_citable());
    }

    #[test]
    fn test_serialize_camel_case() {
        let json = serde_json::to_value(record("T", 100)).unwrap();
        assert_eq!(json["sourceId"], "abc");
        assert!(json["doi"].is_null());
        assert!(json.get("abstract").is_some());
        assert!(json.get("score").is_none());
    }
}
