//! Common utilities for formatters.
//!
//! Responsibilities:
//! - String escaping for CSV and table cells.
//! - Metric and missing-value rendering shared by the text formats.
//! - Flattening a recall report into per-row lines.
//! - Atomic file writing.
//!
//! Does NOT handle:
//! - Format-specific layout (lives in respective formatter modules).

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use top_services_client::RecallReport;

/// String shown for padded or missing cells in table and CSV output.
pub const DEFAULT_MISSING_VALUE: &str = "N/A";

/// Format an optional string value, using the default missing value if None.
pub fn format_missing(opt: Option<&str>) -> &str {
    opt.unwrap_or(DEFAULT_MISSING_VALUE)
}

/// Render a metric without a trailing `.0` for whole numbers.
pub fn format_metric(value: f64) -> String {
    value.to_string()
}

/// Escape a string value for CSV output according to RFC 4180.
///
/// Rules:
/// - Wrap in double quotes if the field contains comma, double quote, or newline
/// - Double any internal double quotes (e.g., `"hello"` -> `""hello""`)
pub fn escape_csv(s: &str) -> String {
    let needs_quoting = s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r');
    if !needs_quoting {
        return s.to_string();
    }
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Escape control characters so a value stays inside one table cell.
///
/// Tab, newline and carriage return become `\t`, `\n` and `\r`; other
/// control characters become `\u{..}` escapes.
pub fn escape_table_cell(s: &str) -> String {
    if !s.chars().any(char::is_control) {
        return s.to_string();
    }
    let mut escaped = String::with_capacity(s.len() + 2);
    for c in s.chars() {
        match c {
            '\t' => escaped.push_str("\\t"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            c if c.is_control() => escaped.extend(c.escape_unicode()),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Build a CSV header row from field names.
pub fn build_csv_header(fields: &[&str]) -> String {
    let escaped: Vec<String> = fields.iter().map(|f| escape_csv(f)).collect();
    format!("{}\n", escaped.join(","))
}

/// Build a CSV data row from field values.
pub fn build_csv_row(values: &[String]) -> String {
    let escaped: Vec<String> = values.iter().map(|v| escape_csv(v)).collect();
    format!("{}\n", escaped.join(","))
}

/// One comparison row with the match status of each side.
///
/// `gemini_found` is whether the recalled service appears in the search
/// results; `search_matched` is whether the search result mentions any
/// recalled service. Both are `None` on a padded side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonLine<'a> {
    pub position: usize,
    pub gemini: Option<&'a str>,
    pub gemini_found: Option<bool>,
    pub search: Option<&'a str>,
    pub search_matched: Option<bool>,
}

pub fn comparison_lines(report: &RecallReport) -> Vec<ComparisonLine<'_>> {
    report
        .rows
        .iter()
        .map(|row| {
            let gemini = row.gemini.as_deref();
            let search = row.search.as_deref();
            ComparisonLine {
                position: row.position,
                gemini,
                gemini_found: gemini.map(|name| report.both.iter().any(|b| b == name)),
                search,
                search_matched: search.map(|title| !report.search_only.iter().any(|s| s == title)),
            }
        })
        .collect()
}

pub fn format_flag(flag: Option<bool>) -> &'static str {
    match flag {
        Some(true) => "yes",
        Some(false) => "no",
        None => DEFAULT_MISSING_VALUE,
    }
}

/// Write output to file or stdout.
///
/// When writing to a file, a confirmation goes to stderr so stdout stays
/// clean for pipelines.
pub fn output_result(
    output: &str,
    format: crate::formatters::OutputFormat,
    output_file: Option<&Path>,
) -> Result<()> {
    if let Some(path) = output_file {
        write_to_file(output, path)
            .with_context(|| format!("Failed to write output to {}", path.display()))?;
        eprintln!(
            "Results written to {} ({:?} format)",
            path.display(),
            format
        );
    } else {
        print!("{}", output);
    }
    Ok(())
}

/// Write formatted output to a file atomically.
///
/// Creates parent directories if needed, writes to a temp file in the same
/// directory then renames it over `path`.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    use std::fs;
    use std::io::Write;
    use tempfile::NamedTempFile;

    // A bare file name has an empty parent; use the current directory.
    let parent_dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    if parent_dir != Path::new(".") {
        fs::create_dir_all(parent_dir)
            .with_context(|| format!("Failed to create directory: {}", parent_dir.display()))?;
    }

    let mut temp_file = NamedTempFile::new_in(parent_dir)
        .with_context(|| format!("Failed to create temp file in: {}", parent_dir.display()))?;

    temp_file
        .write_all(content.as_bytes())
        .context("Failed to write to temp file")?;
    temp_file.flush().context("Failed to flush temp file")?;

    temp_file
        .persist(path)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    Ok(())
}
