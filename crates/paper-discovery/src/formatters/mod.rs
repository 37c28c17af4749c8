//! Citation export formats for reference managers.

mod bibtex;
mod ris;

use serde::Deserialize;

pub use bibtex::{escape_bibtex, format_bibtex};
pub use ris::format_ris;

use crate::models::PaperRecord;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// RIS (EndNote, Mendeley, Zotero).
    Ris,
    /// BibTeX (LaTeX).
    Bibtex,
}

impl ExportFormat {
    /// MIME type of the rendered file.
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Ris => "application/x-research-info-systems",
            Self::Bibtex => "application/x-bibtex",
        }
    }

    /// Suggested download file name.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Ris => "references.ris",
            Self::Bibtex => "references.bib",
        }
    }

    /// Render `papers` in this format, in citation order.
    #[must_use]
    pub fn render(self, papers: &[PaperRecord]) -> String {
        match self {
            Self::Ris => format_ris(papers),
            Self::Bibtex => format_bibtex(papers),
        }
    }
}
