//! Custom Search JSON API endpoint with page-by-page collection.

use reqwest::Client;
use serde_json::Value;
use top_services_config::constants::SEARCH_PAGE_SIZE;
use tracing::debug;

use crate::endpoints::send_request_with_retry;
use crate::error::{ClientError, Result};
use crate::models::SearchResponse;

const SOURCE: &str = "search";

/// Fetch one page of results starting at the 1-based position `start`.
#[allow(clippy::too_many_arguments)]
pub async fn search_page(
    client: &Client,
    base_url: &str,
    api_key: &str,
    cx_id: &str,
    query: &str,
    start: usize,
    num: usize,
    max_retries: usize,
) -> Result<Vec<Value>> {
    let start = start.to_string();
    let num = num.to_string();
    let builder = client.get(base_url).query(&[
        ("key", api_key),
        ("cx", cx_id),
        ("q", query),
        ("start", start.as_str()),
        ("num", num.as_str()),
    ]);
    let response = send_request_with_retry(builder, max_retries).await?;

    let body = response.text().await.map_err(|e| e.without_url())?;
    let page: SearchResponse = serde_json::from_str(&body)
        .map_err(|e| ClientError::format(SOURCE, format!("invalid response JSON: {}", e)))?;

    Ok(page.items.unwrap_or_default())
}

/// Collect up to `num_results` raw result items, one page at a time.
///
/// Stops early at the first empty page. The returned list never exceeds
/// `num_results`.
pub async fn collect_results(
    client: &Client,
    base_url: &str,
    api_key: &str,
    cx_id: &str,
    query: &str,
    num_results: usize,
    max_retries: usize,
) -> Result<Vec<Value>> {
    let mut items: Vec<Value> = Vec::with_capacity(num_results);

    for offset in (0..num_results).step_by(SEARCH_PAGE_SIZE) {
        let num = SEARCH_PAGE_SIZE.min(num_results - offset);
        let page = search_page(
            client,
            base_url,
            api_key,
            cx_id,
            query,
            offset + 1,
            num,
            max_retries,
        )
        .await?;

        if page.is_empty() {
            debug!(start = offset + 1, "Search page has no items, stopping");
            break;
        }
        items.extend(page);
        if items.len() >= num_results {
            break;
        }
    }

    items.truncate(num_results);
    Ok(items)
}
