//! CLI command implementations.

pub mod compare;
pub mod rank;

use anyhow::{Context, Result};
use std::path::PathBuf;
use top_services_client::{RecordWarning, ServicesClient};
use top_services_config::Config;
use tracing::info;

use crate::formatters::OutputFormat;

/// Where and how a command writes its report.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format: OutputFormat,
    pub file: Option<PathBuf>,
}

pub fn build_client(config: &Config) -> Result<ServicesClient> {
    let client = ServicesClient::builder()
        .from_config(config)
        .build()
        .context("Failed to build services client")?;
    info!(
        sources = ?client.source_names(),
        timeout_secs = client.timeout().as_secs(),
        "Services client ready"
    );
    Ok(client)
}

/// Print skipped records to stderr; the run carries on without them.
pub fn report_skipped(skipped: &[RecordWarning]) {
    for warning in skipped {
        eprintln!("Warning: {}", warning);
    }
}
