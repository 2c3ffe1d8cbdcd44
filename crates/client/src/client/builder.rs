//! Client builder for constructing [`ServicesClient`] instances.
//!
//! This module is responsible for:
//! - Building the shared HTTP client (timeout, user agent)
//! - Instantiating the adapters named in a `Config`
//! - Accepting extra, caller-provided `DataSource`s
//!
//! # Invariants
//! - Configured sources come first, in configuration order, followed by
//!   extra sources in the order they were added.

use std::time::Duration;

use crate::client::ServicesClient;
use crate::error::Result;
use crate::sources::{self, DataSource};
use top_services_config::{Config, constants::DEFAULT_TIMEOUT_SECS};

/// Builder for creating a new [`ServicesClient`].
///
/// # Example
///
/// ```rust,ignore
/// let client = ServicesClient::builder().from_config(&config).build()?;
/// let report = client.top_services(&NamedMetric::new("score"), 10).await?;
/// ```
pub struct ServicesClientBuilder {
    config: Option<Config>,
    extra_sources: Vec<Box<dyn DataSource>>,
    timeout: Duration,
}

impl Default for ServicesClientBuilder {
    fn default() -> Self {
        Self {
            config: None,
            extra_sources: Vec::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ServicesClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the sources and connection settings of `config`.
    pub fn from_config(mut self, config: &Config) -> Self {
        self.timeout = config.connection.timeout;
        self.config = Some(config.clone());
        self
    }

    /// Set the per-fetch timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Add a source that is not described by the configuration.
    pub fn source(mut self, source: Box<dyn DataSource>) -> Self {
        self.extra_sources.push(source);
        self
    }

    /// Build the [`ServicesClient`].
    ///
    /// # Errors
    ///
    /// Returns `ClientError::HttpError` if the HTTP client fails to build.
    pub fn build(self) -> Result<ServicesClient> {
        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("top-services/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let mut all_sources = match &self.config {
            Some(config) => sources::from_config(&http, config),
            None => Vec::new(),
        };
        all_sources.extend(self.extra_sources);

        Ok(ServicesClient {
            sources: all_sources,
            timeout: self.timeout,
        })
    }
}
