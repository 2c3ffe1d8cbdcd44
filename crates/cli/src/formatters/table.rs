//! Table formatter implementation.
//!
//! Responsibilities:
//! - Format reports as tab-separated tables for terminals.
//!
//! Does NOT handle:
//! - Other output formats.
//! - File I/O.
//!
//! Invariants:
//! - Every record yields exactly one line; control characters in names are
//!   escaped so they cannot add lines or columns.

use anyhow::Result;
use top_services_client::{RecallReport, TopServicesResult};

use crate::formatters::Formatter;
use crate::formatters::common::{
    comparison_lines, escape_table_cell, format_flag, format_metric, format_missing,
};

/// Table formatter.
pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn format_top_services(&self, result: &TopServicesResult) -> Result<String> {
        if result.entries.is_empty() {
            return Ok("No services found.\n".to_string());
        }

        let mut output = format!(
            "Rank\tService\t{}\tSource\n",
            escape_table_cell(&result.metric)
        );
        for entry in &result.entries {
            output.push_str(&format!(
                "{}\t{}\t{}\t{}\n",
                entry.rank,
                escape_table_cell(&entry.id),
                format_metric(entry.metric),
                escape_table_cell(&entry.record.source)
            ));
        }
        Ok(output)
    }

    fn format_comparison(&self, report: &RecallReport) -> Result<String> {
        if report.rows.is_empty() {
            return Ok("No services found.\n".to_string());
        }

        let mut output = String::from("#\tGemini\tFound\tSearch\tMatched\n");
        for line in comparison_lines(report) {
            output.push_str(&format!(
                "{}\t{}\t{}\t{}\t{}\n",
                line.position,
                escape_table_cell(format_missing(line.gemini)),
                format_flag(line.gemini_found),
                escape_table_cell(format_missing(line.search)),
                format_flag(line.search_matched),
            ));
        }

        output.push('\n');
        for (label, names) in [
            ("In both", &report.both),
            ("Gemini only", &report.gemini_only),
            ("Search only", &report.search_only),
        ] {
            let names: Vec<String> = names.iter().map(|n| escape_table_cell(n)).collect();
            output.push_str(&format!("{} ({}): {}\n", label, names.len(), names.join(", ")));
        }
        Ok(output)
    }
}
