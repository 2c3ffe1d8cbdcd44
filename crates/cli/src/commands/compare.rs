//! Compare command implementation.

use anyhow::{Context, Result};
use top_services_config::Config;
use tracing::info;

use crate::cancellation::{CancellationToken, run_cancellable};
use crate::commands::{OutputOptions, build_client};
use crate::formatters::{get_formatter, output_result};

pub async fn run(
    config: &Config,
    output: &OutputOptions,
    cancel: &CancellationToken,
) -> Result<()> {
    let client = build_client(config)?;

    let report = run_cancellable(cancel, async {
        client
            .recall_report()
            .await
            .context("Failed to fetch recall and search results")
    })
    .await?;

    info!(
        both = report.both.len(),
        gemini_only = report.gemini_only.len(),
        search_only = report.search_only.len(),
        "Comparison complete"
    );

    let rendered = get_formatter(output.format).format_comparison(&report)?;
    output_result(&rendered, output.format, output.file.as_deref())
}
