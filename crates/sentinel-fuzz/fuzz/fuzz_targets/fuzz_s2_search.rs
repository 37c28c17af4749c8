#![no_main]

use libfuzzer_sys::fuzz_target;
use paper_discovery::models::S2SearchResponse;

fuzz_target!(|data: &[u8]| {
    // Parsing and normalization must never panic
    if let Ok(response) = serde_json::from_slice::<S2SearchResponse>(data) {
        for paper in response.data {
            let candidate = paper.into_candidate(2025);
            let _ = candidate.record.is_citable();
            let _ = candidate.record.title_key();
        }
    }
});
