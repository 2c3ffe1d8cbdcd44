//! NDJSON formatter implementation.
//!
//! Responsibilities:
//! - Format reports as NDJSON (Newline Delimited JSON).
//! - Each ranked entry or comparison row is a single line of JSON.
//!
//! Does NOT handle:
//! - Pretty-printed JSON (use JsonFormatter for that).
//!
//! Invariants:
//! - Each line is a valid JSON object.
//! - An empty report renders as an empty string.

use anyhow::Result;
use serde::Serialize;
use top_services_client::{RecallReport, TopServicesResult};

use crate::formatters::Formatter;
use crate::formatters::common::comparison_lines;

/// NDJSON formatter.
pub struct NdjsonFormatter;

fn to_ndjson<T: Serialize>(items: &[T]) -> Result<String> {
    let mut output = String::new();
    for item in items {
        output.push_str(&serde_json::to_string(item)?);
        output.push('\n');
    }
    Ok(output)
}

impl Formatter for NdjsonFormatter {
    fn format_top_services(&self, result: &TopServicesResult) -> Result<String> {
        to_ndjson(&result.entries)
    }

    fn format_comparison(&self, report: &RecallReport) -> Result<String> {
        to_ndjson(&comparison_lines(report))
    }
}
