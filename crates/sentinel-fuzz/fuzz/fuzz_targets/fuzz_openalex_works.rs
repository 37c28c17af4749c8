#![no_main]

use libfuzzer_sys::fuzz_target;
use paper_discovery::models::{OaWorksResponse, reconstruct_abstract};

fuzz_target!(|data: &[u8]| {
    if let Ok(response) = serde_json::from_slice::<OaWorksResponse>(data) {
        for work in response.results {
            if let Some(index) = &work.abstract_inverted_index {
                let _ = reconstruct_abstract(index);
            }
            let _ = work.into_candidate(2025);
        }
    }
});
