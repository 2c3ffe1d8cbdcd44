//! Web search source with an optional on-disk result cache.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::Value;
use top_services_config::SearchConfig;
use tracing::info;

use crate::cache::SearchCache;
use crate::endpoints;
use crate::error::Result;
use crate::models::{FetchOutcome, RecordWarning, SearchItem, ServiceRecord};
use crate::sources::DataSource;

pub const NAME: &str = "search";

/// Collects the first `num_results` search hits for the configured query.
pub struct SearchSource {
    http: Client,
    config: SearchConfig,
    cache: Option<SearchCache>,
    refresh: bool,
    max_retries: usize,
}

impl SearchSource {
    pub fn new(http: Client, config: SearchConfig, max_retries: usize) -> Self {
        Self {
            http,
            config,
            cache: None,
            refresh: false,
            max_retries,
        }
    }

    /// Read and write results through `cache`; `refresh` skips the read.
    pub fn with_cache(mut self, cache: SearchCache, refresh: bool) -> Self {
        self.cache = Some(cache);
        self.refresh = refresh;
        self
    }

    async fn fetch_items(&self) -> Result<Vec<Value>> {
        if let Some(cache) = &self.cache
            && !self.refresh
            && let Some(items) = cache.load(&self.config.query, self.config.num_results)
        {
            info!(
                path = %cache.path().display(),
                items = items.len(),
                "Using cached search results"
            );
            return Ok(items);
        }

        let items = endpoints::collect_results(
            &self.http,
            &self.config.base_url,
            self.config.api_key.expose_secret(),
            &self.config.cx_id,
            &self.config.query,
            self.config.num_results,
            self.max_retries,
        )
        .await?;

        if let Some(cache) = &self.cache {
            cache.store(&self.config.query, self.config.num_results, &items)?;
        }
        Ok(items)
    }
}

#[async_trait]
impl DataSource for SearchSource {
    fn name(&self) -> &str {
        NAME
    }

    async fn fetch_all(&self) -> Result<FetchOutcome> {
        let mut items = self.fetch_items().await?;
        items.truncate(self.config.num_results);
        Ok(records_from_items(&items))
    }
}

/// Turn ordered search hits into records scored by position.
///
/// Item `i` of `n` gets `score = n - i` and `search_position = i + 1`.
pub fn records_from_items(items: &[Value]) -> FetchOutcome {
    let total = items.len();
    let mut outcome = FetchOutcome::default();

    for (index, item) in items.iter().enumerate() {
        let hit: SearchItem = match SearchItem::deserialize(item) {
            Ok(hit) => hit,
            Err(e) => {
                outcome.warnings.push(RecordWarning::new(
                    NAME,
                    index,
                    None,
                    format!("not a search result object: {}", e),
                ));
                continue;
            }
        };

        let Some(title) = hit
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
        else {
            outcome
                .warnings
                .push(RecordWarning::new(NAME, index, None, "missing title"));
            continue;
        };

        let mut record = ServiceRecord::new(title, NAME)
            .with_metric("score", (total - index) as f64)
            .with_metric("search_position", (index + 1) as f64);
        record.url = hit.link.filter(|l| !l.is_empty());
        if let Some(snippet) = hit.snippet {
            record.description.push(snippet);
        }
        outcome.records.push(record);
    }

    outcome
}
