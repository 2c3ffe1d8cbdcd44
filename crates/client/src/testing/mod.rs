//! Testing utilities for client tests.
//!
//! Available when running tests or when the `test-utils` feature is enabled.
//!
//! # Example
//! ```ignore
//! use top_services_client::testing::{StaticSource, load_fixture};
//!
//! let payload = load_fixture("records/services.json");
//! let source = StaticSource::new("fake").with_records(vec![/* ... */]);
//! ```

use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

use crate::error::{ClientError, Result};
use crate::models::{FetchOutcome, RecordWarning, ServiceRecord};
use crate::sources::DataSource;

/// Load a JSON fixture file from the fixtures directory.
///
/// # Arguments
/// * `fixture_path` - Relative path within the fixtures directory (e.g., "gemini/generate_content.json")
///
/// # Panics
/// - If the fixture file cannot be read
/// - If the file content is not valid JSON
pub fn load_fixture(fixture_path: &str) -> serde_json::Value {
    let full_path = fixture_path_buf(fixture_path);
    let content = std::fs::read_to_string(&full_path)
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", full_path.display()));
    serde_json::from_str(&content).expect("Invalid JSON in fixture")
}

/// Absolute path of a fixture file.
pub fn fixture_path_buf(fixture_path: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(fixture_path)
}

/// In-memory `DataSource` with canned results.
pub struct StaticSource {
    name: String,
    outcome: FetchOutcome,
    delay: Option<Duration>,
    fail_unavailable: bool,
}

impl StaticSource {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            outcome: FetchOutcome::default(),
            delay: None,
            fail_unavailable: false,
        }
    }

    pub fn with_records(mut self, records: Vec<ServiceRecord>) -> Self {
        self.outcome.records = records;
        self
    }

    pub fn with_warning(mut self, warning: RecordWarning) -> Self {
        self.outcome.warnings.push(warning);
        self
    }

    /// Sleep before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Answer with `ClientError::SourceUnavailable`.
    pub fn unavailable(mut self) -> Self {
        self.fail_unavailable = true;
        self
    }
}

#[async_trait]
impl DataSource for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_all(&self) -> Result<FetchOutcome> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_unavailable {
            return Err(ClientError::unavailable(&self.name, "configured to fail"));
        }
        Ok(self.outcome.clone())
    }
}
