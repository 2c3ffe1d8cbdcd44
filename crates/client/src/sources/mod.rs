//! Data source adapters.
//!
//! Responsibilities:
//! - Define the `DataSource` seam every adapter implements.
//! - Build the configured adapters from a `Config`.
//!
//! Does NOT handle:
//! - Timeouts, concurrency or merging (see `aggregate`).
//!
//! Invariants:
//! - `fetch_all` fails only when the source as a whole is unusable; a bad
//!   record is reported as a `RecordWarning` inside the outcome.

use async_trait::async_trait;
use reqwest::Client;
use top_services_config::{Config, SourceConfig};

use crate::cache::SearchCache;
use crate::error::Result;
use crate::models::FetchOutcome;

pub mod file;
pub mod gemini;
pub mod http;
pub(crate) mod records;
pub mod search;
pub mod verify;

pub use file::FileSource;
pub use gemini::GeminiSource;
pub use http::HttpSource;
pub use records::parse_records_document;
pub use search::SearchSource;
pub use verify::VerifySource;

/// A provider of service records.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Stable name used in records, warnings and errors.
    fn name(&self) -> &str;

    /// Fetch every record the source offers.
    async fn fetch_all(&self) -> Result<FetchOutcome>;
}

/// Instantiate one adapter per configured source, in configuration order.
pub fn from_config(http: &Client, config: &Config) -> Vec<Box<dyn DataSource>> {
    let max_retries = config.connection.max_retries;

    config
        .sources
        .iter()
        .map(|source| -> Box<dyn DataSource> {
            match source {
                SourceConfig::Gemini(gemini) => Box::new(GeminiSource::new(
                    http.clone(),
                    gemini.clone(),
                    config.ranking.top_n,
                    max_retries,
                )),
                SourceConfig::Search(search) => {
                    let source = SearchSource::new(http.clone(), search.clone(), max_retries);
                    match &config.cache.dir {
                        Some(dir) => Box::new(
                            source.with_cache(SearchCache::new(dir), config.cache.refresh),
                        ),
                        None => Box::new(source),
                    }
                }
                SourceConfig::Http(endpoint) => Box::new(HttpSource::new(
                    http.clone(),
                    endpoint.clone(),
                    max_retries,
                )),
                SourceConfig::File(file) => Box::new(FileSource::new(file.clone())),
                SourceConfig::Verify(verify) => Box::new(VerifySource::new(
                    http.clone(),
                    verify.clone(),
                    max_retries,
                )),
            }
        })
        .collect()
}
