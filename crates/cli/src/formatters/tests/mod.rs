//! Formatter tests split by concept.
//!
//! Test organization:
//! - `common_tests.rs`: Escaping, helpers, comparison flattening, file output
//! - `table_tests.rs`: Table formatter tests
//! - `csv_tests.rs`: CSV formatter tests
//! - `json_tests.rs`: JSON and NDJSON formatter tests
//! - `empty_tests.rs`: Empty result set tests

mod common_tests;
mod csv_tests;

use top_services_client::{
    ComparisonRow, RankedEntry, RecallReport, ServiceRecord, TopServicesResult,
};

/// A three-entry report ordered by `score`.
pub fn sample_result() -> TopServicesResult {
    let entries = [("Tableau", 8.0, "gemini+search"), ("Power BI", 6.5, "gemini"), ("Domo", 3.0, "search")]
        .into_iter()
        .enumerate()
        .map(|(i, (id, score, source))| RankedEntry {
            rank: i + 1,
            id: id.to_string(),
            metric: score,
            record: ServiceRecord::new(id, source).with_metric("score", score),
        })
        .collect();

    TopServicesResult {
        metric: "score".to_string(),
        top_n: 3,
        entries,
        skipped: Vec::new(),
    }
}

pub fn empty_result() -> TopServicesResult {
    TopServicesResult {
        metric: "score".to_string(),
        top_n: 10,
        entries: Vec::new(),
        skipped: Vec::new(),
    }
}

/// Two recalled services against three search titles.
pub fn sample_report() -> RecallReport {
    let row = |position: usize, gemini: Option<&str>, search: Option<&str>| ComparisonRow {
        position,
        gemini: gemini.map(str::to_string),
        search: search.map(str::to_string),
    };

    RecallReport {
        rows: vec![
            row(1, Some("Tableau"), Some("Tableau | 公式サイト")),
            row(2, Some("Sisense"), Some("Domo | 公式サイト")),
            row(3, None, Some("Yellowfin, Inc.")),
        ],
        both: vec!["Tableau".to_string()],
        gemini_only: vec!["Sisense".to_string()],
        search_only: vec!["Domo | 公式サイト".to_string(), "Yellowfin, Inc.".to_string()],
    }
}
