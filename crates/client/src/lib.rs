//! Data source clients and ranking for top-services.
//!
//! This crate fetches service records from the configured sources
//! (generative recall, web search, a JSON endpoint, a local file or a
//! verified catalogue), merges them, and ranks them into a top-N report.

mod aggregate;
mod cache;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod ranking;
pub mod recall;
pub mod sources;

#[cfg(any(feature = "test-utils", test))]
pub mod testing;

pub use aggregate::{fetch_sources, merge_outcomes};
pub use cache::SearchCache;
pub use client::ServicesClient;
pub use client::builder::ServicesClientBuilder;
pub use error::{ClientError, Result};
pub use models::{
    ComparisonRow, FetchOutcome, RankedEntry, RecallReport, RecordWarning, ServiceRecord,
    SourceOutcome, TopServicesResult,
};
pub use ranking::{MetricSelector, NamedMetric, rank};
pub use recall::compare_recall;
pub use sources::DataSource;
