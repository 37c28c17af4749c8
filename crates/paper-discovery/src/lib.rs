//! Paper Discovery
//!
//! Finds up to five relevant, citable academic papers for a research topic.
//! Semantic Scholar is the primary source; OpenAlex tops up short result sets.
//! Candidates are filtered, scored, deduplicated by normalized title and
//! returned best first.
//!
//! # Features
//!
//! - **Fallback search**: the secondary source is only queried when the primary
//!   yields fewer than five usable papers
//! - **Resilient**: 429/5xx responses from the primary are retried with
//!   exponential backoff and jitter
//! - **Cached**: per-topic results are memoized with single-flight loading
//! - **Export**: RIS and BibTeX citation files
//!
//! # Example
//!
//! ```no_run
//! use paper_discovery::{Config, PaperDiscovery};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let discovery = PaperDiscovery::new(&config)?;
//!
//!     let papers = discovery.discover("quantum error correction").await?;
//!     for paper in &papers {
//!         println!("{} ({})", paper.title, paper.year);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod discovery;
pub mod error;
pub mod formatters;
pub mod models;
pub mod ranking;
pub mod server;

pub use client::PaperSource;
pub use config::Config;
pub use discovery::PaperDiscovery;
pub use error::{ClientError, DiscoveryError};
pub use models::PaperRecord;
