//! Data models: the canonical paper record and provider response schemas.
//!
//! Provider shapes use `#[serde(default)]` everywhere so partial responses
//! still parse; nothing provider-specific leaves this module except through
//! `into_candidate`.

mod openalex;
mod paper;
mod semantic_scholar;

pub use openalex::{
    OaAuthor, OaAuthorship, OaLocation, OaOpenAccess, OaSource, OaWork, OaWorksResponse,
    reconstruct_abstract,
};
pub use paper::{Candidate, PaperRecord, normalize_title};
pub use semantic_scholar::{S2Author, S2ExternalIds, S2OpenAccessPdf, S2Paper, S2SearchResponse};
