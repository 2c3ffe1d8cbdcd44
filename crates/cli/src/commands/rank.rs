//! Rank command implementation.

use anyhow::{Context, Result};
use top_services_client::NamedMetric;
use top_services_config::Config;
use tracing::info;

use crate::cancellation::{CancellationToken, run_cancellable};
use crate::commands::{OutputOptions, build_client, report_skipped};
use crate::formatters::{get_formatter, output_result};

pub async fn run(
    config: &Config,
    output: &OutputOptions,
    cancel: &CancellationToken,
) -> Result<()> {
    let client = build_client(config)?;
    let selector = NamedMetric::new(config.ranking.metric.clone());
    let top_n = config.ranking.top_n;

    let result = run_cancellable(cancel, async {
        client
            .top_services(&selector, top_n)
            .await
            .context("Failed to fetch service records")
    })
    .await?;

    info!(
        metric = %result.metric,
        entries = result.entries.len(),
        skipped = result.skipped.len(),
        "Ranking complete"
    );
    report_skipped(&result.skipped);

    let rendered = get_formatter(output.format).format_top_services(&result)?;
    output_result(&rendered, output.format, output.file.as_deref())
}
