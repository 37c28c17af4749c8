//! Semantic Scholar search response schema.

use serde::Deserialize;

use super::{Candidate, PaperRecord};
use crate::config::{api, search};

/// Response from `GET /paper/search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct S2SearchResponse {
    /// Total number of matching papers.
    #[serde(default)]
    pub total: i64,

    /// Papers in this page.
    #[serde(default)]
    pub data: Vec<S2Paper>,
}

/// A paper as returned by the Graph API.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S2Paper {
    /// Semantic Scholar paper ID.
    #[serde(default)]
    pub paper_id: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub r#abstract: Option<String>,

    #[serde(default)]
    pub year: Option<i32>,

    #[serde(default)]
    pub venue: Option<String>,

    #[serde(default)]
    pub authors: Vec<S2Author>,

    #[serde(default)]
    pub reference_count: Option<i32>,

    #[serde(default)]
    pub open_access_pdf: Option<S2OpenAccessPdf>,

    #[serde(default)]
    pub external_ids: Option<S2ExternalIds>,
}

/// Author reference.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S2Author {
    #[serde(default)]
    pub author_id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,
}

/// Open access PDF information.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct S2OpenAccessPdf {
    /// Direct URL to the PDF (often empty string when unavailable).
    #[serde(default)]
    pub url: Option<String>,
}

/// External identifiers; only the DOI is used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct S2ExternalIds {
    #[serde(rename = "DOI", default)]
    pub doi: Option<String>,
}

impl S2Paper {
    /// Open access PDF URL, if a usable one is present.
    #[must_use]
    pub fn pdf_url(&self) -> Option<&str> {
        self.open_access_pdf
            .as_ref()?
            .url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
    }

    /// Normalize into a candidate. `current_year` fills a missing year.
    #[must_use]
    pub fn into_candidate(self, current_year: i32) -> Candidate {
        let pdf_url = self.pdf_url().map(str::to_string);
        let direct_link = pdf_url.is_some();
        let url = pdf_url.unwrap_or_else(|| {
            format!(
                "{}/{}",
                api::SEMANTIC_SCHOLAR_PAPER_PAGE,
                self.paper_id.as_deref().unwrap_or_default()
            )
        });

        let record = PaperRecord {
            title: self.title.unwrap_or_default(),
            authors: self.authors.into_iter().filter_map(|a| a.name).collect(),
            r#abstract: self.r#abstract.unwrap_or_default(),
            year: self.year.unwrap_or(current_year),
            venue: self
                .venue
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| search::DEFAULT_VENUE.to_string()),
            url,
            source_id: self.paper_id,
            doi: self.external_ids.and_then(|ids| ids.doi),
        };

        Candidate::new(record)
            .with_reference_count(self.reference_count)
            .with_direct_link(direct_link)
    }
}
