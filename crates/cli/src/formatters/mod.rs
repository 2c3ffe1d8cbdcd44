//! Output formatters for CLI commands.
//!
//! Responsibilities:
//! - Provide multiple output formats: Table, CSV, JSON and NDJSON.
//! - Implement the `Formatter` trait for top-N reports and recall comparisons.
//!
//! Does NOT handle:
//! - Ranking or matching (see `top_services_client`).
//! - Choosing between stdout and a file (see `common::output_result`).
//!
//! Invariants:
//! - Tables use tab-separation for consistent alignment in standard terminals.
//! - Rendering a well-formed result never fails for table and CSV output.
//!
//! ## Empty-State Handling
//!
//! | Format | Empty State Behavior | Example |
//! |--------|---------------------|---------|
//! | Table | Human message | `No services found.` |
//! | CSV | Header only | `rank,service,score,source\n` |
//! | JSON | Valid empty structure | `"entries": []` |
//! | NDJSON | Empty string | `` |

use anyhow::Result;
use clap::ValueEnum;
use top_services_client::{RecallReport, TopServicesResult};

mod common;
mod csv;
mod json;
mod ndjson;
mod table;

pub use common::{output_result, write_to_file};
pub use csv::CsvFormatter;
pub use json::JsonFormatter;
pub use ndjson::NdjsonFormatter;
pub use table::TableFormatter;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
    #[value(alias = "jsonl")]
    Ndjson,
}

/// Renders pipeline results as text.
pub trait Formatter {
    /// Render a ranked top-N report.
    fn format_top_services(&self, result: &TopServicesResult) -> Result<String>;

    /// Render a recall comparison.
    fn format_comparison(&self, report: &RecallReport) -> Result<String>;
}

/// Get a formatter for the given output format.
pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Table => Box::new(TableFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Ndjson => Box::new(NdjsonFormatter),
    }
}

#[cfg(test)]
mod tests;
