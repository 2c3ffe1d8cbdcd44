//! Entry point tying the sources, the aggregator and the ranker together.
//!
//! # Submodules
//! - [`builder`]: Client construction from a `Config` or hand-picked sources
//!
//! # What this module does NOT handle:
//! - HTTP details (delegated to [`crate::endpoints`])
//! - Record parsing (delegated to [`crate::sources`])
//! - Rendering (the CLI formatters)

pub mod builder;

use std::time::Duration;
use tracing::debug;

use crate::aggregate::{fetch_sources, merge_outcomes};
use crate::error::Result;
use crate::models::{FetchOutcome, RecallReport, SourceOutcome, TopServicesResult};
use crate::ranking::{MetricSelector, rank};
use crate::recall::compare_recall;
use crate::sources::DataSource;
use crate::sources::{gemini, search};

pub use builder::ServicesClientBuilder;

/// Runs the configured sources and produces reports.
pub struct ServicesClient {
    sources: Vec<Box<dyn DataSource>>,
    timeout: Duration,
}

impl ServicesClient {
    /// Create a new client builder.
    pub fn builder() -> ServicesClientBuilder {
        ServicesClientBuilder::new()
    }

    /// Names of the sources this client queries, in order.
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Per-fetch timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch every source concurrently and keep the outcomes apart.
    pub async fn fetch_each(&self) -> Result<Vec<SourceOutcome>> {
        fetch_sources(&self.sources, self.timeout).await
    }

    /// Fetch every source and merge records that share an id.
    ///
    /// `selector` decides which record survives when one source repeats an id.
    pub async fn fetch_merged<S>(&self, selector: &S) -> Result<FetchOutcome>
    where
        S: MetricSelector + ?Sized,
    {
        Ok(merge_outcomes(self.fetch_each().await?, selector))
    }

    /// Fetch, merge and rank into a top-N report.
    ///
    /// The report's `skipped` list holds fetch-time warnings followed by
    /// records the selector could not score.
    pub async fn top_services<S>(&self, selector: &S, top_n: usize) -> Result<TopServicesResult>
    where
        S: MetricSelector + ?Sized,
    {
        let merged = self.fetch_merged(selector).await?;
        debug!(
            records = merged.records.len(),
            top_n = top_n,
            "Ranking merged records"
        );

        let mut result = rank(&merged.records, selector, top_n);
        let mut skipped = merged.warnings;
        skipped.append(&mut result.skipped);
        result.skipped = skipped;
        Ok(result)
    }

    /// Compare recalled services with search results.
    ///
    /// A side whose source is not configured is treated as empty.
    pub async fn recall_report(&self) -> Result<RecallReport> {
        let outcomes = self.fetch_each().await?;
        let records_of = |name: &str| {
            outcomes
                .iter()
                .find(|o| o.source == name)
                .map(|o| o.outcome.records.as_slice())
                .unwrap_or_default()
        };

        Ok(compare_recall(records_of(gemini::NAME), records_of(search::NAME)))
    }
}
