//! CSV formatter tests.

use super::{sample_report, sample_result};
use crate::formatters::{CsvFormatter, Formatter};

#[test]
fn test_csv_top_services() {
    let output = CsvFormatter.format_top_services(&sample_result()).unwrap();

    assert_eq!(
        output,
        "rank,service,score,source\n\
         1,Tableau,8,gemini+search\n\
         2,Power BI,6.5,gemini\n\
         3,Domo,3,search\n"
    );
}

#[test]
fn test_csv_escapes_service_names() {
    let mut result = sample_result();
    result.entries[0].id = "Tableau, by Salesforce".to_string();

    let output = CsvFormatter.format_top_services(&result).unwrap();
    assert!(output.contains("1,\"Tableau, by Salesforce\",8,gemini+search\n"));
}

#[test]
fn test_csv_comparison() {
    let output = CsvFormatter.format_comparison(&sample_report()).unwrap();
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines[0], "position,gemini,gemini_found,search,search_matched");
    assert_eq!(lines[1], "1,Tableau,yes,Tableau | 公式サイト,yes");
    assert_eq!(lines[2], "2,Sisense,no,Domo | 公式サイト,no");
    assert_eq!(lines[3], "3,N/A,N/A,\"Yellowfin, Inc.\",no");
}
