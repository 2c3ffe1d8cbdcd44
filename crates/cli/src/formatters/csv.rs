//! CSV formatter implementation.
//!
//! Responsibilities:
//! - Format reports as RFC 4180 compliant CSV.
//!
//! Does NOT handle:
//! - Other output formats.
//!
//! Invariants:
//! - The header is always written, even for an empty report.

use anyhow::Result;
use top_services_client::{RecallReport, TopServicesResult};

use crate::formatters::Formatter;
use crate::formatters::common::{
    build_csv_header, build_csv_row, comparison_lines, format_flag, format_metric, format_missing,
};

/// CSV formatter.
pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format_top_services(&self, result: &TopServicesResult) -> Result<String> {
        let mut output = build_csv_header(&["rank", "service", result.metric.as_str(), "source"]);
        for entry in &result.entries {
            output.push_str(&build_csv_row(&[
                entry.rank.to_string(),
                entry.id.clone(),
                format_metric(entry.metric),
                entry.record.source.clone(),
            ]));
        }
        Ok(output)
    }

    fn format_comparison(&self, report: &RecallReport) -> Result<String> {
        let mut output = build_csv_header(&[
            "position",
            "gemini",
            "gemini_found",
            "search",
            "search_matched",
        ]);
        for line in comparison_lines(report) {
            output.push_str(&build_csv_row(&[
                line.position.to_string(),
                format_missing(line.gemini).to_string(),
                format_flag(line.gemini_found).to_string(),
                format_missing(line.search).to_string(),
                format_flag(line.search_matched).to_string(),
            ]));
        }
        Ok(output)
    }
}
