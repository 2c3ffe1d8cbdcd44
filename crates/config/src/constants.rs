//! Centralized constants for the top-services workspace.
//!
//! Default values used across crates live here so the loader, the client
//! and the CLI agree on them.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default per-fetch timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed per-fetch timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Retries are off unless explicitly configured.
pub const DEFAULT_MAX_RETRIES: usize = 0;

/// Upper bound for `TOP_SERVICES_MAX_RETRIES`.
pub const MAX_MAX_RETRIES: usize = 10;

// =============================================================================
// Ranking Defaults
// =============================================================================

/// Default number of services in the report.
pub const DEFAULT_TOP_N: usize = 10;

/// Default metric used for ordering.
pub const DEFAULT_METRIC: &str = "score";

/// Sources queried when `TOP_SERVICES_SOURCES` is unset.
pub const DEFAULT_SOURCES: &str = "gemini,search";

// =============================================================================
// Gemini Defaults
// =============================================================================

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_CATEGORY: &str = "BI tools";
pub const DEFAULT_REGION: &str = "Japan";
pub const DEFAULT_LANGUAGE: &str = "Japanese";

// =============================================================================
// Custom Search Defaults
// =============================================================================

pub const DEFAULT_SEARCH_BASE_URL: &str = "https://www.googleapis.com/customsearch/v1";
pub const DEFAULT_SEARCH_QUERY: &str = "BIツール 公式サイト";

/// Default number of search results to collect.
pub const DEFAULT_SEARCH_RESULTS: usize = 20;

/// The Custom Search API never returns more than 100 results for a query.
pub const MAX_SEARCH_RESULTS: usize = 100;

/// The Custom Search API returns at most 10 items per request.
pub const SEARCH_PAGE_SIZE: usize = 10;

// =============================================================================
// Cache
// =============================================================================

/// File name of the cached search results inside the cache directory.
pub const SEARCH_CACHE_FILE: &str = "search_results.json";
