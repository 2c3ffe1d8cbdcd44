//! Tests for shared formatter helpers.

use super::sample_report;
use crate::formatters::common::{
    build_csv_header, build_csv_row, comparison_lines, escape_csv, escape_table_cell, format_flag,
    format_metric, format_missing,
};
use crate::formatters::write_to_file;

#[test]
fn test_escape_csv_plain_value_is_unchanged() {
    assert_eq!(escape_csv("Tableau"), "Tableau");
}

#[test]
fn test_escape_csv_quotes_commas_quotes_and_newlines() {
    assert_eq!(escape_csv("Yellowfin, Inc."), "\"Yellowfin, Inc.\"");
    assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
    assert_eq!(escape_csv("two\nlines"), "\"two\nlines\"");
}

#[test]
fn test_escape_table_cell_escapes_control_characters() {
    assert_eq!(escape_table_cell("Power BI"), "Power BI");
    assert_eq!(escape_table_cell("Power\nBI"), "Power\\nBI");
    assert_eq!(escape_table_cell("Tab\tleau\r"), "Tab\\tleau\\r");
    assert_eq!(escape_table_cell("bell\u{7}"), "bell\\u{7}");
    assert_eq!(escape_table_cell("公式サイト"), "公式サイト");
}

#[test]
fn test_csv_header_and_row() {
    assert_eq!(build_csv_header(&["rank", "service"]), "rank,service\n");
    assert_eq!(
        build_csv_row(&["1".to_string(), "A, B".to_string()]),
        "1,\"A, B\"\n"
    );
}

#[test]
fn test_format_metric_drops_trailing_zero() {
    assert_eq!(format_metric(8.0), "8");
    assert_eq!(format_metric(6.5), "6.5");
    assert_eq!(format_metric(-2.0), "-2");
}

#[test]
fn test_missing_values_render_as_na() {
    assert_eq!(format_missing(None), "N/A");
    assert_eq!(format_missing(Some("x")), "x");
    assert_eq!(format_flag(None), "N/A");
    assert_eq!(format_flag(Some(true)), "yes");
    assert_eq!(format_flag(Some(false)), "no");
}

#[test]
fn test_comparison_lines_mark_matches() {
    let report = sample_report();
    let lines = comparison_lines(&report);

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0].gemini_found, Some(true));
    assert_eq!(lines[0].search_matched, Some(true));
    assert_eq!(lines[1].gemini_found, Some(false));
    assert_eq!(lines[1].search_matched, Some(false));
    assert_eq!(lines[2].gemini, None);
    assert_eq!(lines[2].gemini_found, None);
    assert_eq!(lines[2].search_matched, Some(false));
}

#[test]
fn test_write_to_file_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reports").join("top.csv");

    write_to_file("rank,service\n", &path).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "rank,service\n");
}

#[test]
fn test_write_to_file_replaces_existing_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("top.json");
    std::fs::write(&path, "old content that is longer").unwrap();

    write_to_file("{}", &path).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
}
