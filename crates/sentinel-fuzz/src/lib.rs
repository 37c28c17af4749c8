//! Fuzzing library for paper-discovery.
//!
//! Fuzz targets feed arbitrary bytes through provider response parsing,
//! normalization and citation export.
//!
//! # Usage
//!
//! ```bash
//! cd crates/sentinel-fuzz
//! cargo +nightly fuzz run fuzz_openalex_works -- -max_total_time=60
//! ```

pub use paper_discovery::{formatters, models};
