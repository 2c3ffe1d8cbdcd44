//! JSON formatter implementation.
//!
//! Responsibilities:
//! - Format reports as pretty-printed JSON.
//!
//! Does NOT handle:
//! - Other output formats.

use anyhow::Result;
use top_services_client::{RecallReport, TopServicesResult};

use crate::formatters::Formatter;

/// JSON formatter.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_top_services(&self, result: &TopServicesResult) -> Result<String> {
        Ok(serde_json::to_string_pretty(result)? + "\n")
    }

    fn format_comparison(&self, report: &RecallReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)? + "\n")
    }
}
