//! Web search source tests.
//!
//! # Invariants
//! - Pages are requested with `start = 1, 11, 21, ...` and `num <= 10`
//! - Collection stops at `num_results` or at the first page without items
//! - A matching cache entry is used unless a refresh is requested
//! - A cache fetched for fewer results than requested is refetched
//! - Every network fetch rewrites the cache

mod common;

use common::*;
use serde_json::json;
use top_services_client::sources::SearchSource;
use top_services_client::{DataSource, SearchCache};
use wiremock::matchers::{method, path, query_param};

async fn mount_two_pages(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .and(query_param("start", "1"))
        .and(query_param("num", "10"))
        .and(query_param("key", "test-search-key"))
        .and(query_param("cx", "test-cx"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("search/page1.json")))
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .and(query_param("start", "11"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("search/page2.json")))
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .and(query_param("start", "21"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("search/empty_page.json")),
        )
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_collect_results_pages_until_empty() {
    let mock_server = MockServer::start().await;
    mount_two_pages(&mock_server).await;

    let source = SearchSource::new(Client::new(), search_config(&mock_server.uri(), 30), 0);
    let outcome = source.fetch_all().await.unwrap();

    assert_eq!(outcome.records.len(), 12);
    assert_eq!(outcome.records[0].id, "Tableau | 公式サイト");
    assert_eq!(outcome.records[0].metric("score"), Some(12.0));
    assert_eq!(outcome.records[11].metric("search_position"), Some(12.0));
    assert_eq!(
        outcome.records[11].url.as_deref(),
        Some("https://example.com/11")
    );

    let starts: Vec<String> = mock_server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter_map(|r| {
            r.url
                .query_pairs()
                .find(|(k, _)| k == "start")
                .map(|(_, v)| v.into_owned())
        })
        .collect();
    assert_eq!(starts, vec!["1", "11", "21"]);
}

#[tokio::test]
async fn test_collect_results_stops_at_requested_count() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("start", "1"))
        .and(query_param("num", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("search/page1.json")))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("start", "11"))
        .and(query_param("num", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("search/page2.json")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let items = endpoints::collect_results(
        &Client::new(),
        &format!("{}/customsearch/v1", mock_server.uri()),
        "test-search-key",
        "test-cx",
        "BIツール 公式サイト",
        11,
        0,
    )
    .await
    .unwrap();

    assert_eq!(items.len(), 11);
    assert_eq!(items[10]["title"], "LaKeel BI | 公式サイト");
}

#[tokio::test]
async fn test_single_short_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("start", "1"))
        .and(query_param("num", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("search/page1.json")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let source = SearchSource::new(Client::new(), search_config(&mock_server.uri(), 3), 0);
    let outcome = source.fetch_all().await.unwrap();

    assert_eq!(outcome.records.len(), 3);
    assert_eq!(outcome.records[0].metric("score"), Some(3.0));
}

#[tokio::test]
async fn test_fetch_writes_cache_and_reuses_it() {
    let mock_server = MockServer::start().await;
    let cache_dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"title": "Tableau", "link": "https://www.tableau.com"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = search_config(&mock_server.uri(), 1);

    let first = SearchSource::new(Client::new(), config.clone(), 0)
        .with_cache(SearchCache::new(cache_dir.path()), false)
        .fetch_all()
        .await
        .unwrap();
    assert!(cache_dir.path().join("search_results.json").exists());

    let second = SearchSource::new(Client::new(), config, 0)
        .with_cache(SearchCache::new(cache_dir.path()), false)
        .fetch_all()
        .await
        .unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_refresh_bypasses_cache() {
    let mock_server = MockServer::start().await;
    let cache_dir = tempfile::tempdir().unwrap();
    let config = search_config(&mock_server.uri(), 1);

    SearchCache::new(cache_dir.path())
        .store(&config.query, 1, &[json!({"title": "Stale"})])
        .unwrap();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"title": "Fresh"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let outcome = SearchSource::new(Client::new(), config.clone(), 0)
        .with_cache(SearchCache::new(cache_dir.path()), true)
        .fetch_all()
        .await
        .unwrap();
    assert_eq!(outcome.records[0].id, "Fresh");

    let cached = SearchCache::new(cache_dir.path()).load(&config.query, 1).unwrap();
    assert_eq!(cached, vec![json!({"title": "Fresh"})]);
}

#[tokio::test]
async fn test_cache_for_other_query_is_ignored() {
    let mock_server = MockServer::start().await;
    let cache_dir = tempfile::tempdir().unwrap();

    SearchCache::new(cache_dir.path())
        .store("CRM tools", 1, &[json!({"title": "Salesforce"})])
        .unwrap();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"title": "Tableau"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let outcome = SearchSource::new(Client::new(), search_config(&mock_server.uri(), 1), 0)
        .with_cache(SearchCache::new(cache_dir.path()), false)
        .fetch_all()
        .await
        .unwrap();
    assert_eq!(outcome.records[0].id, "Tableau");
}

#[tokio::test]
async fn test_cache_with_fewer_results_is_refetched() {
    let mock_server = MockServer::start().await;
    let cache_dir = tempfile::tempdir().unwrap();
    mount_two_pages(&mock_server).await;

    let small = search_config(&mock_server.uri(), 1);
    SearchCache::new(cache_dir.path())
        .store(&small.query, 1, &[json!({"title": "Only one"})])
        .unwrap();

    let outcome = SearchSource::new(Client::new(), search_config(&mock_server.uri(), 10), 0)
        .with_cache(SearchCache::new(cache_dir.path()), false)
        .fetch_all()
        .await
        .unwrap();

    assert_eq!(outcome.records.len(), 10);
    assert!(outcome.records.iter().all(|r| r.id != "Only one"));
    let cached = SearchCache::new(cache_dir.path())
        .load(&small.query, 10)
        .unwrap();
    assert_eq!(cached.len(), 10);
}

#[tokio::test]
async fn test_api_error_does_not_leak_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"code": 400, "message": "Request contains an invalid argument."}
        })))
        .mount(&mock_server)
        .await;

    let source = SearchSource::new(Client::new(), search_config(&mock_server.uri(), 5), 0);
    let err = source.fetch_all().await.unwrap_err();

    let message = err.to_string();
    assert!(message.contains("invalid argument"));
    assert!(!message.contains("test-search-key"));
}
