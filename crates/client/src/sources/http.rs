//! Generic JSON endpoint source.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use top_services_config::HttpSourceConfig;

use crate::endpoints;
use crate::error::Result;
use crate::models::FetchOutcome;
use crate::sources::DataSource;
use crate::sources::records::parse_records_document;

pub const NAME: &str = "http";

/// Reads service records from an authenticated JSON endpoint.
pub struct HttpSource {
    http: Client,
    config: HttpSourceConfig,
    max_retries: usize,
}

impl HttpSource {
    pub fn new(http: Client, config: HttpSourceConfig, max_retries: usize) -> Self {
        Self {
            http,
            config,
            max_retries,
        }
    }
}

#[async_trait]
impl DataSource for HttpSource {
    fn name(&self) -> &str {
        NAME
    }

    async fn fetch_all(&self) -> Result<FetchOutcome> {
        let document = endpoints::fetch_records(
            &self.http,
            &self.config.endpoint,
            self.config.api_token.expose_secret(),
            NAME,
            self.max_retries,
        )
        .await?;
        parse_records_document(NAME, document)
    }
}
