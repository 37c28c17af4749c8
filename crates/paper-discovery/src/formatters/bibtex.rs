//! BibTeX export.

use crate::models::PaperRecord;

/// Format papers as `@article` entries keyed `ref1`, `ref2`, ... in order.
#[must_use]
pub fn format_bibtex(papers: &[PaperRecord]) -> String {
    let mut output = String::new();

    for (i, paper) in papers.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }

        let authors =
            if paper.authors.is_empty() { "Unknown".to_string() } else { paper.authors.join(" and ") };

        output.push_str(&format!("@article{{ref{},\n", i + 1));
        output.push_str(&format!("  title = {{{}}},\n", escape_bibtex(&paper.title)));
        output.push_str(&format!("  author = {{{}}},\n", escape_bibtex(&authors)));
        output.push_str(&format!("  year = {{{}}},\n", paper.year));
        output.push_str(&format!("  journal = {{{}}},\n", escape_bibtex(&paper.venue)));
        // URLs and DOIs are verbatim fields; escaping would break them.
        output.push_str(&format!("  url = {{{}}},\n", paper.url));
        if let Some(doi) = &paper.doi {
            output.push_str(&format!("  doi = {{{doi}}},\n"));
        }
        output.push_str("}\n");
    }

    output
}

/// Escape a string for BibTeX output.
#[must_use]
pub fn escape_bibtex(s: &str) -> String {
    s.replace('\\', "\\textbackslash{}")
        .replace('{', "\\{")
        .replace('}', "\\}")
        .replace('&', "\\&")
        .replace('%', "\\%")
        .replace('$', "\\$")
        .replace('#', "\\#")
        .replace('_', "\\_")
}
