#![no_main]

use libfuzzer_sys::fuzz_target;
use paper_discovery::formatters::{format_bibtex, format_ris};
use paper_discovery::models::PaperRecord;

fuzz_target!(|data: &[u8]| {
    if let Ok(papers) = serde_json::from_slice::<Vec<PaperRecord>>(data) {
        let ris = format_ris(&papers);
        // Every record terminates, whatever the field contents
        assert!(ris.matches("ER  - ").count() >= papers.len());
        let _ = format_bibtex(&papers);
    }
});
