//! On-disk cache of raw search results.
//!
//! Responsibilities:
//! - Return cached items for a query when the cache file matches it.
//! - Rewrite the cache atomically after a network fetch.
//!
//! Does NOT handle:
//! - Deciding whether to bypass the cache (`--refresh` is the caller's call).
//!
//! Invariants:
//! - A missing, unreadable or corrupt cache file is never an error; it is a miss.
//! - Cached items belong to exactly one query; a different query is a miss.
//! - A cache fetched with a smaller result count than requested is a miss;
//!   a larger one is truncated to the requested count.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use top_services_config::constants::SEARCH_CACHE_FILE;
use tracing::{debug, warn};

use crate::error::{ClientError, Result};

#[derive(Debug, Serialize, Deserialize)]
struct CacheDocument {
    query: String,
    /// Result count requested when the items were fetched.
    #[serde(default)]
    num_results: usize,
    fetched_at: DateTime<Utc>,
    items: Vec<Value>,
}

/// Search result cache stored as `<dir>/search_results.json`.
#[derive(Debug, Clone)]
pub struct SearchCache {
    path: PathBuf,
}

impl SearchCache {
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(SEARCH_CACHE_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Cached items for `query`, if the cache holds at least `num_results`
    /// requested results for it.
    pub fn load(&self, query: &str, num_results: usize) -> Option<Vec<Value>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No search cache yet");
                return None;
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read search cache");
                return None;
            }
        };

        let document: CacheDocument = match serde_json::from_str(&content) {
            Ok(document) => document,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring corrupt search cache");
                return None;
            }
        };

        if document.query != query {
            debug!(
                cached_query = %document.query,
                query = query,
                "Search cache holds a different query"
            );
            return None;
        }

        if document.num_results < num_results {
            debug!(
                cached = document.num_results,
                requested = num_results,
                "Search cache holds fewer results than requested"
            );
            return None;
        }

        let mut items = document.items;
        items.truncate(num_results);
        debug!(
            path = %self.path.display(),
            fetched_at = %document.fetched_at,
            items = items.len(),
            "Using cached search results"
        );
        Some(items)
    }

    /// Replace the cache with `items` fetched for `query` at `num_results`.
    pub fn store(&self, query: &str, num_results: usize, items: &[Value]) -> Result<()> {
        let document = CacheDocument {
            query: query.to_string(),
            num_results,
            fetched_at: Utc::now(),
            items: items.to_vec(),
        };
        let content = serde_json::to_vec_pretty(&document).map_err(|e| self.error(e))?;

        let parent_dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        if !parent_dir.as_os_str().is_empty() {
            fs::create_dir_all(parent_dir).map_err(|e| self.error(e))?;
        }

        let mut temp_file = NamedTempFile::new_in(parent_dir).map_err(|e| self.error(e))?;
        temp_file.write_all(&content).map_err(|e| self.error(e))?;
        temp_file.flush().map_err(|e| self.error(e))?;
        temp_file
            .persist(&self.path)
            .map_err(|e| self.error(e.error))?;

        debug!(path = %self.path.display(), items = items.len(), "Search cache updated");
        Ok(())
    }

    fn error(&self, e: impl std::fmt::Display) -> ClientError {
        ClientError::Cache {
            path: self.path.clone(),
            message: e.to_string(),
        }
    }
}
