//! Local JSON file source.

use async_trait::async_trait;
use std::io::ErrorKind;
use top_services_config::FileSourceConfig;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::models::FetchOutcome;
use crate::sources::DataSource;
use crate::sources::records::parse_records_document;

pub const NAME: &str = "file";

/// Reads service records from a JSON file on disk.
pub struct FileSource {
    config: FileSourceConfig,
}

impl FileSource {
    pub fn new(config: FileSourceConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl DataSource for FileSource {
    fn name(&self) -> &str {
        NAME
    }

    async fn fetch_all(&self) -> Result<FetchOutcome> {
        let path = &self.config.path;
        debug!(path = %path.display(), "Reading records file");

        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            let message = match e.kind() {
                ErrorKind::NotFound => format!("file not found: {}", path.display()),
                _ => format!("cannot read {}: {}", path.display(), e),
            };
            ClientError::unavailable(NAME, message)
        })?;

        let document = serde_json::from_str(&content)
            .map_err(|e| ClientError::format(NAME, format!("invalid JSON: {}", e)))?;
        parse_records_document(NAME, document)
    }
}
