//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` that merges `.env`, environment and CLI values.
//! - Validate every required key for the selected sources in `build()`.
//! - Produce the immutable `Config` snapshot.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//!
//! Invariants / Assumptions:
//! - Builder methods take precedence over environment variables.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.
//! - `build()` performs no I/O besides resolving the platform cache directory.

use secrecy::SecretString;
use std::path::PathBuf;
use std::time::Duration;

use super::env::{apply_env, split_list};
use super::error::ConfigError;
use crate::constants::{
    DEFAULT_CATEGORY, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, DEFAULT_LANGUAGE,
    DEFAULT_MAX_RETRIES, DEFAULT_METRIC, DEFAULT_REGION, DEFAULT_SEARCH_BASE_URL,
    DEFAULT_SEARCH_QUERY, DEFAULT_SEARCH_RESULTS, DEFAULT_SOURCES, DEFAULT_TIMEOUT_SECS,
    DEFAULT_TOP_N, MAX_MAX_RETRIES, MAX_SEARCH_RESULTS, MAX_TIMEOUT_SECS,
};
use crate::types::{
    CacheConfig, Config, ConnectionConfig, FileSourceConfig, GeminiConfig, HttpSourceConfig,
    RankingConfig, SearchConfig, SourceConfig, SourceKind, VerifyConfig,
};

/// Configuration loader that builds config from environment variables and overrides.
#[derive(Default)]
pub struct ConfigLoader {
    pub(super) sources: Option<Vec<String>>,
    pub(super) top_n: Option<usize>,
    pub(super) metric: Option<String>,
    pub(super) timeout: Option<Duration>,
    pub(super) max_retries: Option<usize>,
    pub(super) cache_dir: Option<PathBuf>,
    pub(super) refresh: bool,
    pub(super) gemini_api_key: Option<SecretString>,
    pub(super) gemini_model: Option<String>,
    pub(super) gemini_base_url: Option<String>,
    pub(super) category: Option<String>,
    pub(super) region: Option<String>,
    pub(super) language: Option<String>,
    pub(super) search_api_key: Option<SecretString>,
    pub(super) search_cx_id: Option<String>,
    pub(super) search_query: Option<String>,
    pub(super) search_results: Option<usize>,
    pub(super) search_base_url: Option<String>,
    pub(super) endpoint: Option<String>,
    pub(super) api_token: Option<SecretString>,
    pub(super) records_file: Option<PathBuf>,
    pub(super) catalogue_file: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new, empty configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` is set to "true" or "1", the .env file is not loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The `.env` file exists but has invalid syntax (`ConfigError::DotenvParse`)
    /// - The `.env` file exists but cannot be read (`ConfigError::DotenvIo`)
    ///
    /// Missing `.env` files are silently ignored.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(path) => {
                tracing::debug!(path = %path.display(), "Loaded .env file");
                Ok(self)
            }
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    /// Check if a dotenv error indicates the file was not found.
    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Read configuration from environment variables.
    ///
    /// Values already set through builder methods are kept.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Select the sources to query, by name.
    pub fn with_sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sources = Some(sources.into_iter().map(Into::into).collect());
        self
    }

    /// Select the sources from a comma-separated list.
    pub fn with_sources_list(self, list: &str) -> Self {
        self.with_sources(split_list(list))
    }

    /// Set the number of entries in the report.
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = Some(top_n);
        self
    }

    /// Set the metric used for ordering.
    pub fn with_metric(mut self, metric: String) -> Self {
        self.metric = Some(metric);
        self
    }

    /// Set the per-fetch timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the number of retries for transient failures.
    pub fn with_max_retries(mut self, retries: usize) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Override the cache directory.
    pub fn with_cache_dir(mut self, dir: PathBuf) -> Self {
        self.cache_dir = Some(dir);
        self
    }

    /// Ignore cached search results.
    pub fn with_refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }

    /// Set the Gemini API key.
    pub fn with_gemini_api_key(mut self, key: String) -> Self {
        self.gemini_api_key = Some(SecretString::new(key.into()));
        self
    }

    /// Override the Gemini API root (primarily for testing).
    pub fn with_gemini_base_url(mut self, url: String) -> Self {
        self.gemini_base_url = Some(url);
        self
    }

    /// Set the Custom Search credentials.
    pub fn with_search_credentials(mut self, api_key: String, cx_id: String) -> Self {
        self.search_api_key = Some(SecretString::new(api_key.into()));
        self.search_cx_id = Some(cx_id);
        self
    }

    /// Override the Custom Search endpoint (primarily for testing).
    pub fn with_search_base_url(mut self, url: String) -> Self {
        self.search_base_url = Some(url);
        self
    }

    /// Set the number of search results to collect.
    pub fn with_search_results(mut self, count: usize) -> Self {
        self.search_results = Some(count);
        self
    }

    /// Set the generic JSON endpoint.
    pub fn with_endpoint(mut self, endpoint: String) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Set the bearer token for the generic JSON endpoint.
    pub fn with_api_token(mut self, token: String) -> Self {
        self.api_token = Some(SecretString::new(token.into()));
        self
    }

    /// Set the records file for the file source.
    pub fn with_records_file(mut self, path: PathBuf) -> Self {
        self.records_file = Some(path);
        self
    }

    /// Set the service catalogue for the verify source.
    pub fn with_catalogue_file(mut self, path: PathBuf) -> Self {
        self.catalogue_file = Some(path);
        self
    }

    /// Build the final configuration.
    ///
    /// Fails with the name of the first missing or malformed setting.
    pub fn build(self) -> Result<Config, ConfigError> {
        let kinds = self.resolve_source_kinds()?;

        let mut sources = Vec::with_capacity(kinds.len());
        for kind in kinds {
            sources.push(self.build_source(kind)?);
        }

        let metric = self
            .metric
            .clone()
            .unwrap_or_else(|| DEFAULT_METRIC.to_string());
        if metric.trim().is_empty() {
            return Err(ConfigError::invalid("TOP_SERVICES_METRIC", "must not be empty"));
        }

        let connection = ConnectionConfig {
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            max_retries: self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
        };
        Self::validate_connection(&connection)?;
        if sources.iter().any(|s| s.kind() != SourceKind::File) {
            Self::validate_retry_budget(&connection)?;
        }

        let cache = CacheConfig {
            dir: self.cache_dir.clone().or_else(default_cache_dir),
            refresh: self.refresh,
        };

        Ok(Config {
            sources,
            ranking: RankingConfig {
                top_n: self.top_n.unwrap_or(DEFAULT_TOP_N),
                metric: metric.trim().to_string(),
            },
            connection,
            cache,
        })
    }

    /// Parse, validate and de-duplicate the requested source names (order preserved).
    fn resolve_source_kinds(&self) -> Result<Vec<SourceKind>, ConfigError> {
        let names = self
            .sources
            .clone()
            .unwrap_or_else(|| split_list(DEFAULT_SOURCES));

        let mut kinds: Vec<SourceKind> = Vec::new();
        for name in names.iter().filter(|n| !n.trim().is_empty()) {
            let kind = SourceKind::parse(name).ok_or_else(|| {
                ConfigError::invalid(
                    "TOP_SERVICES_SOURCES",
                    format!(
                        "unknown source '{}' (valid: {})",
                        name.trim(),
                        SourceKind::ALL.map(SourceKind::as_str).join(", ")
                    ),
                )
            })?;
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }

        if kinds.is_empty() {
            return Err(ConfigError::NoSources);
        }
        Ok(kinds)
    }

    fn build_source(&self, kind: SourceKind) -> Result<SourceConfig, ConfigError> {
        match kind {
            SourceKind::Gemini => Ok(SourceConfig::Gemini(self.gemini_config()?)),
            SourceKind::Search => {
                let num_results = self.search_results.unwrap_or(DEFAULT_SEARCH_RESULTS);
                if !(1..=MAX_SEARCH_RESULTS).contains(&num_results) {
                    return Err(ConfigError::invalid(
                        "TOP_SERVICES_SEARCH_RESULTS",
                        format!(
                            "must be between 1 and {} (got {})",
                            MAX_SEARCH_RESULTS, num_results
                        ),
                    ));
                }
                Ok(SourceConfig::Search(SearchConfig {
                    api_key: required(&self.search_api_key, "CUSTOM_SEARCH_API_KEY")?,
                    cx_id: required(&self.search_cx_id, "CX_ID_KEY")?,
                    base_url: validate_and_normalize_url(
                        "TOP_SERVICES_SEARCH_BASE_URL",
                        self.search_base_url
                            .as_deref()
                            .unwrap_or(DEFAULT_SEARCH_BASE_URL),
                    )?,
                    query: self
                        .search_query
                        .clone()
                        .unwrap_or_else(|| DEFAULT_SEARCH_QUERY.to_string()),
                    num_results,
                }))
            }
            SourceKind::Http => {
                let endpoint = required(&self.endpoint, "TOP_SERVICES_ENDPOINT")?;
                Ok(SourceConfig::Http(HttpSourceConfig {
                    endpoint: validate_and_normalize_url("TOP_SERVICES_ENDPOINT", &endpoint)?,
                    api_token: required(&self.api_token, "TOP_SERVICES_API_TOKEN")?,
                }))
            }
            SourceKind::File => Ok(SourceConfig::File(FileSourceConfig {
                path: required(&self.records_file, "TOP_SERVICES_RECORDS_FILE")?,
            })),
            SourceKind::Verify => Ok(SourceConfig::Verify(VerifyConfig {
                gemini: self.gemini_config()?,
                catalogue_file: required(&self.catalogue_file, "TOP_SERVICES_CATALOGUE_FILE")?,
            })),
        }
    }

    fn gemini_config(&self) -> Result<GeminiConfig, ConfigError> {
        Ok(GeminiConfig {
            api_key: required(&self.gemini_api_key, "GEMINI_API_KEY")?,
            base_url: validate_and_normalize_url(
                "TOP_SERVICES_GEMINI_BASE_URL",
                self.gemini_base_url
                    .as_deref()
                    .unwrap_or(DEFAULT_GEMINI_BASE_URL),
            )?,
            model: self
                .gemini_model
                .clone()
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            category: self
                .category
                .clone()
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            region: self
                .region
                .clone()
                .unwrap_or_else(|| DEFAULT_REGION.to_string()),
            language: self
                .language
                .clone()
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
        })
    }

    /// Validates timeout and retry bounds.
    fn validate_connection(connection: &ConnectionConfig) -> Result<(), ConfigError> {
        let timeout_secs = connection.timeout.as_secs();

        if timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout {
                message: "timeout must be greater than 0 seconds".to_string(),
            });
        }

        if timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::InvalidTimeout {
                message: format!(
                    "timeout exceeds maximum allowed value of {} seconds",
                    MAX_TIMEOUT_SECS
                ),
            });
        }

        if connection.max_retries > MAX_MAX_RETRIES {
            return Err(ConfigError::InvalidMaxRetries {
                message: format!(
                    "must be between 0 and {} (got {})",
                    MAX_MAX_RETRIES, connection.max_retries
                ),
            });
        }

        Ok(())
    }

    /// Retry backoff (1s, 2s, 4s, ...) runs inside the per-fetch timeout, so
    /// the total wait must leave time for at least one more attempt.
    fn validate_retry_budget(connection: &ConnectionConfig) -> Result<(), ConfigError> {
        let retries = connection.max_retries.min(MAX_MAX_RETRIES) as u32;
        let backoff_secs = 2u64.pow(retries) - 1;
        let timeout_secs = connection.timeout.as_secs();

        if backoff_secs >= timeout_secs {
            return Err(ConfigError::InvalidMaxRetries {
                message: format!(
                    "{} retries wait {}s in backoff, which does not fit the {}s timeout; \
                     lower TOP_SERVICES_MAX_RETRIES or raise TOP_SERVICES_TIMEOUT",
                    connection.max_retries, backoff_secs, timeout_secs
                ),
            });
        }
        Ok(())
    }
}

fn required<T: Clone>(value: &Option<T>, var: &str) -> Result<T, ConfigError> {
    value
        .clone()
        .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
}

fn default_cache_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "top-services").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Validates and normalizes an endpoint URL.
///
/// Validation rules:
/// - Parse as an absolute URL
/// - Require scheme is http or https
/// - Require host is present
/// - Normalize by stripping trailing slash
fn validate_and_normalize_url(var: &str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(ConfigError::MissingEnvVar(var.to_string()));
    }

    let parsed = url::Url::parse(trimmed).map_err(|e| {
        ConfigError::invalid(
            var,
            format!("must be an absolute http(s) URL with a host: {e}"),
        )
    })?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ConfigError::invalid(
            var,
            format!("scheme must be http or https, got: {scheme}"),
        ));
    }

    if parsed.host_str().is_none() {
        return Err(ConfigError::invalid(var, "host is required"));
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}
