//! RIS export.
//!
//! Every tag starts at column 0 as `XX  - ` and lines end with CRLF, which is
//! what EndNote accepts most reliably.

use crate::models::PaperRecord;

const CRLF: &str = "\r\n";

/// Longest abstract written to the `AB` tag.
const MAX_ABSTRACT_CHARS: usize = 1000;

/// Format papers as RIS records separated by a blank line.
#[must_use]
pub fn format_ris(papers: &[PaperRecord]) -> String {
    papers.iter().map(format_record).collect::<Vec<_>>().join(&format!("{CRLF}{CRLF}"))
}

fn format_record(paper: &PaperRecord) -> String {
    let mut lines = vec!["TY  - JOUR".to_string()];

    let title = if paper.title.trim().is_empty() { "Untitled" } else { single_line(&paper.title) };
    lines.push(format!("TI  - {title}"));

    if paper.authors.is_empty() {
        lines.push("AU  - Unknown Author".to_string());
    }
    for author in &paper.authors {
        lines.push(format!("AU  - {}", single_line(author)));
    }

    lines.push(format!("PY  - {}", paper.year));
    lines.push(format!("JO  - {}", single_line(&paper.venue)));
    lines.push(format!("T2  - {}", single_line(&paper.venue)));

    if !paper.r#abstract.is_empty() {
        let truncated: String = paper.r#abstract.chars().take(MAX_ABSTRACT_CHARS).collect();
        lines.push(format!("AB  - {}", fold_newlines(&truncated)));
    }

    if !paper.url.is_empty() {
        lines.push(format!("UR  - {}", paper.url));
    }
    match paper.doi.as_deref() {
        Some(doi) => lines.push(format!("DO  - {doi}")),
        None if !paper.url.is_empty() => lines.push(format!("DO  - {}", paper.url)),
        None => {}
    }

    lines.push("LA  - English".to_string());
    lines.push("ER  - ".to_string());
    lines.join(CRLF)
}

fn single_line(s: &str) -> &str {
    s.lines().next().unwrap_or_default().trim()
}

fn fold_newlines(s: &str) -> String {
    s.replace("\r\n", " ").replace(['\r', '\n'], " ")
}
