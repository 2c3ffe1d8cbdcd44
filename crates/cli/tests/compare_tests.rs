//! Integration tests for the `compare` command.

mod common;

use common::top_services_cmd;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_gemini(server: &MockServer) {
    let answer = serde_json::json!([
        {"service_name": "Tableau", "explanation": ["Visual analytics"]},
        {"service_name": "Power BI", "explanation": ["Microsoft BI"]},
        {"service_name": "Sisense", "explanation": ["Embedded analytics"]}
    ]);
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
        .and(header("x-goog-api-key", "test-gemini-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": answer.to_string()}]}}]
        })))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_search(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .and(query_param("key", "test-search-key"))
        .and(query_param("cx", "test-cx"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [
                {"title": "Tableau | 公式サイト", "link": "https://www.tableau.com", "snippet": "BI platform"},
                {"title": "Microsoft BI", "link": "https://powerbi.microsoft.com", "snippet": "Try Power BI free"},
                {"title": "Domo | 公式サイト", "link": "https://www.domo.com", "snippet": "Cloud BI"}
            ]
        })))
        .expect(1)
        .mount(server)
        .await;
}

fn compare_cmd(server: &MockServer, cache_dir: &std::path::Path) -> assert_cmd::Command {
    let mut cmd = top_services_cmd();
    cmd.env("GEMINI_API_KEY", "test-gemini-key")
        .env("TOP_SERVICES_GEMINI_BASE_URL", server.uri())
        .env("CUSTOM_SEARCH_API_KEY", "test-search-key")
        .env("CX_ID_KEY", "test-cx")
        .env(
            "TOP_SERVICES_SEARCH_BASE_URL",
            format!("{}/customsearch/v1", server.uri()),
        )
        .env("TOP_SERVICES_SEARCH_RESULTS", "3")
        .arg("--cache-dir")
        .arg(cache_dir);
    cmd
}

#[tokio::test]
async fn test_compare_table_report() {
    let server = MockServer::start().await;
    mount_gemini(&server).await;
    mount_search(&server).await;
    let cache = TempDir::new().unwrap();

    compare_cmd(&server, cache.path())
        .arg("compare")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("#\tGemini\tFound\tSearch\tMatched\n"))
        .stdout(predicate::str::contains(
            "1\tTableau\tyes\tTableau | 公式サイト\tyes\n",
        ))
        .stdout(predicate::str::contains("In both (2): Power BI, Tableau\n"))
        .stdout(predicate::str::contains("Gemini only (1): Sisense\n"))
        .stdout(predicate::str::contains("Search only (1): Domo | 公式サイト\n"));
}

#[tokio::test]
async fn test_compare_json_report_and_cache_file() {
    let server = MockServer::start().await;
    mount_gemini(&server).await;
    mount_search(&server).await;
    let cache = TempDir::new().unwrap();

    let output = compare_cmd(&server, cache.path())
        .args(["-o", "json", "compare"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["both"], serde_json::json!(["Power BI", "Tableau"]));
    assert_eq!(report["rows"].as_array().unwrap().len(), 3);
    assert!(cache.path().join("search_results.json").exists());
}

#[test]
fn test_compare_requires_gemini_and_search() {
    let dir = TempDir::new().unwrap();
    let records = dir.path().join("services.json");
    std::fs::write(&records, "[]").unwrap();

    top_services_cmd()
        .env("TOP_SERVICES_RECORDS_FILE", &records)
        .args(["--sources", "file", "compare"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("TOP_SERVICES_SOURCES"))
        .stderr(predicate::str::contains("missing: gemini, search"));
}
