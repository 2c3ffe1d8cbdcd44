//! Configuration type definitions.
//!
//! Responsibilities:
//! - Define the immutable `Config` snapshot handed to the fetch/rank/report pipeline.
//! - Define one settings struct per data source adapter.
//!
//! Does NOT handle:
//! - Reading values from the environment (see `loader` module).
//! - Network access (see the client crate).
//!
//! Invariants:
//! - All credentials are `secrecy::SecretString` so they never show up in `Debug` output.
//! - A built `Config` always has at least one source and at most one entry per `SourceKind`.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// The kinds of data source the pipeline knows how to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Generative model recall of well-known services.
    Gemini,
    /// Web search results.
    Search,
    /// Generic JSON endpoint returning service records.
    Http,
    /// Local JSON file of service records.
    File,
    /// Generative model checked against a local service catalogue.
    Verify,
}

impl SourceKind {
    /// Every supported kind, in documentation order.
    pub const ALL: [SourceKind; 5] = [
        SourceKind::Gemini,
        SourceKind::Search,
        SourceKind::Http,
        SourceKind::File,
        SourceKind::Verify,
    ];

    /// Stable lowercase name used in configuration and reports.
    pub fn as_str(self) -> &'static str {
        match self {
            SourceKind::Gemini => "gemini",
            SourceKind::Search => "search",
            SourceKind::Http => "http",
            SourceKind::File => "file",
            SourceKind::Verify => "verify",
        }
    }

    /// Parse a source name (case-insensitive, surrounding whitespace ignored).
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings for the generative recall source.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: SecretString,
    /// API root without trailing slash.
    pub base_url: String,
    pub model: String,
    /// Kind of service to ask about (e.g. "BI tools").
    pub category: String,
    /// Market the services should be typical for.
    pub region: String,
    /// Language the answer should be written in.
    pub language: String,
}

/// Settings for the web search source.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub api_key: SecretString,
    /// Programmable search engine id.
    pub cx_id: String,
    pub base_url: String,
    pub query: String,
    /// Number of results to collect, 1..=100.
    pub num_results: usize,
}

/// Settings for the generic JSON endpoint source.
#[derive(Debug, Clone)]
pub struct HttpSourceConfig {
    pub endpoint: String,
    pub api_token: SecretString,
}

/// Settings for the local file source.
#[derive(Debug, Clone)]
pub struct FileSourceConfig {
    pub path: PathBuf,
}

/// Settings for the catalogue verification source.
///
/// Shares the Gemini credentials and model with the recall source.
#[derive(Debug, Clone)]
pub struct VerifyConfig {
    pub gemini: GeminiConfig,
    /// JSON array of service names to verify.
    pub catalogue_file: PathBuf,
}

/// One configured data source.
#[derive(Debug, Clone)]
pub enum SourceConfig {
    Gemini(GeminiConfig),
    Search(SearchConfig),
    Http(HttpSourceConfig),
    File(FileSourceConfig),
    Verify(VerifyConfig),
}

impl SourceConfig {
    /// The kind of this source.
    pub fn kind(&self) -> SourceKind {
        match self {
            SourceConfig::Gemini(_) => SourceKind::Gemini,
            SourceConfig::Search(_) => SourceKind::Search,
            SourceConfig::Http(_) => SourceKind::Http,
            SourceConfig::File(_) => SourceKind::File,
            SourceConfig::Verify(_) => SourceKind::Verify,
        }
    }
}

/// How results are ordered and bounded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingConfig {
    /// Maximum number of entries in the report. Zero yields an empty report.
    pub top_n: usize,
    /// Name of the metric used for ordering.
    pub metric: String,
}

/// Network behavior shared by all remote sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Upper bound for a single source fetch.
    pub timeout: Duration,
    /// Retries for transient failures (429/502/503/504, connect errors).
    pub max_retries: usize,
}

/// Where cached search results live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// `None` disables the cache (no platform cache directory was found).
    pub dir: Option<PathBuf>,
    /// Ignore existing cache entries and always fetch.
    pub refresh: bool,
}

/// Immutable configuration snapshot for one process run.
#[derive(Debug, Clone)]
pub struct Config {
    pub sources: Vec<SourceConfig>,
    pub ranking: RankingConfig,
    pub connection: ConnectionConfig,
    pub cache: CacheConfig,
}

impl Config {
    /// Look up the settings for a given source kind.
    pub fn source(&self, kind: SourceKind) -> Option<&SourceConfig> {
        self.sources.iter().find(|source| source.kind() == kind)
    }

    /// Names of the configured sources, in configuration order.
    pub fn source_names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|s| s.kind().as_str()).collect()
    }
}
