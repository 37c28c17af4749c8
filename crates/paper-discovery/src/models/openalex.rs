//! OpenAlex works response schema.

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

use super::{Candidate, PaperRecord};
use crate::config::search;

const DOI_PREFIX: &str = "https://doi.org/";

/// Response from `GET /works`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OaWorksResponse {
    #[serde(default)]
    pub results: Vec<OaWork>,
}

/// A single work.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OaWork {
    /// OpenAlex ID, e.g. `https://openalex.org/W2741809807`.
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub publication_year: Option<i32>,

    /// DOI as a `https://doi.org/...` URL.
    #[serde(default)]
    pub doi: Option<String>,

    #[serde(default)]
    pub authorships: Vec<OaAuthorship>,

    #[serde(default)]
    pub primary_location: Option<OaLocation>,

    #[serde(default)]
    pub open_access: Option<OaOpenAccess>,

    /// Abstract encoded as word -> positions.
    #[serde(default)]
    pub abstract_inverted_index: Option<HashMap<String, Vec<usize>>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OaAuthorship {
    #[serde(default)]
    pub author: Option<OaAuthor>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OaAuthor {
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OaLocation {
    #[serde(default)]
    pub source: Option<OaSource>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OaSource {
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OaOpenAccess {
    #[serde(default)]
    pub oa_url: Option<String>,
}

/// Rebuild plain text from an inverted index.
///
/// Each word is placed at every position it lists; positions nobody claims are
/// skipped, and the rest are joined with single spaces.
#[must_use]
pub fn reconstruct_abstract(index: &HashMap<String, Vec<usize>>) -> String {
    let mut slots: BTreeMap<usize, &str> = BTreeMap::new();
    for (word, positions) in index {
        for &pos in positions {
            slots.insert(pos, word.as_str());
        }
    }

    slots.into_values().collect::<Vec<_>>().join(" ")
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl OaWork {
    /// Normalize into a candidate. `current_year` fills a missing year.
    #[must_use]
    pub fn into_candidate(self, current_year: i32) -> Candidate {
        let r#abstract =
            self.abstract_inverted_index.as_ref().map(reconstruct_abstract).unwrap_or_default();

        let doi = non_blank(self.doi).map(|d| d.trim_start_matches(DOI_PREFIX).to_string());
        let oa_url = non_blank(self.open_access.and_then(|oa| oa.oa_url));
        let direct_link = oa_url.is_some() || doi.is_some();
        let url = oa_url
            .or_else(|| doi.as_ref().map(|d| format!("{DOI_PREFIX}{d}")))
            .or_else(|| self.id.clone())
            .unwrap_or_default();

        let record = PaperRecord {
            title: non_blank(self.display_name).or(self.title).unwrap_or_default(),
            authors: self
                .authorships
                .into_iter()
                .filter_map(|a| a.author?.display_name)
                .collect(),
            r#abstract,
            year: self.publication_year.unwrap_or(current_year),
            venue: non_blank(
                self.primary_location.and_then(|loc| loc.source).and_then(|s| s.display_name),
            )
            .unwrap_or_else(|| search::DEFAULT_VENUE.to_string()),
            url,
            source_id: self.id,
            doi,
        };

        Candidate::new(record).with_direct_link(direct_link)
    }
}
