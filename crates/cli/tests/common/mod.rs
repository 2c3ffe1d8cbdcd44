//! Shared test utilities for top-services CLI integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Write record files for the `file` source.
//!
//! Invariants / Assumptions:
//! - Every `TOP_SERVICES_*` key and provider credential is cleared, so each
//!   test states the configuration it relies on.
//! - The search cache points at a per-test directory, never the user's.

use assert_cmd::Command;
use std::path::{Path, PathBuf};

const CONFIG_VARS: &[&str] = &[
    "TOP_SERVICES_SOURCES",
    "TOP_SERVICES_TOP_N",
    "TOP_SERVICES_METRIC",
    "TOP_SERVICES_TIMEOUT",
    "TOP_SERVICES_MAX_RETRIES",
    "TOP_SERVICES_CATEGORY",
    "TOP_SERVICES_REGION",
    "TOP_SERVICES_LANGUAGE",
    "TOP_SERVICES_GEMINI_MODEL",
    "TOP_SERVICES_GEMINI_BASE_URL",
    "TOP_SERVICES_SEARCH_QUERY",
    "TOP_SERVICES_SEARCH_RESULTS",
    "TOP_SERVICES_SEARCH_BASE_URL",
    "TOP_SERVICES_ENDPOINT",
    "TOP_SERVICES_API_TOKEN",
    "TOP_SERVICES_RECORDS_FILE",
    "TOP_SERVICES_CATALOGUE_FILE",
    "TOP_SERVICES_CACHE_DIR",
    "TOP_SERVICES_OUTPUT",
    "TOP_SERVICES_LOG_FORMAT",
    "GEMINI_API_KEY",
    "CUSTOM_SEARCH_API_KEY",
    "CX_ID_KEY",
    "RUST_LOG",
];

/// Returns a hermetic `top-services` command for integration testing.
///
/// It ensures:
/// - `DOTENV_DISABLED=1` is set to prevent local `.env` contamination.
/// - Configuration variables from the host are cleared.
pub fn top_services_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("top-services");
    cmd.env("DOTENV_DISABLED", "1");
    for var in CONFIG_VARS {
        cmd.env_remove(var);
    }
    cmd
}

/// A command ranking only the records in `records_file`.
#[allow(dead_code)]
pub fn file_source_cmd(records_file: &Path) -> Command {
    let mut cmd = top_services_cmd();
    cmd.env("TOP_SERVICES_SOURCES", "file")
        .env("TOP_SERVICES_RECORDS_FILE", records_file);
    cmd
}

/// Write `content` as `services.json` under `dir` and return its path.
#[allow(dead_code)]
pub fn write_records(dir: &Path, content: &serde_json::Value) -> PathBuf {
    let path = dir.join("services.json");
    std::fs::write(&path, serde_json::to_vec_pretty(content).unwrap()).unwrap();
    path
}

/// Four well-formed records plus one with an unreadable score.
#[allow(dead_code)]
pub fn sample_records() -> serde_json::Value {
    serde_json::json!([
        {"id": "tableau", "metrics": {"score": 92, "usage": 1200}},
        {"id": "powerbi", "metrics": {"score": 95.5, "usage": 3400}},
        {"id": "looker", "metrics": {"score": 92, "usage": 300}},
        {"id": "qlik", "metrics": {"score": 40, "usage": 800}},
        {"id": "broken", "metrics": {"score": "n/a"}}
    ])
}
