//! Generic JSON records endpoint.

use reqwest::Client;
use serde_json::Value;

use crate::endpoints::send_request_with_retry;
use crate::error::{ClientError, Result};

/// GET the records document from `endpoint` with bearer authentication.
///
/// Returns the parsed JSON body; envelope and record validation happen in
/// the source adapter.
pub async fn fetch_records(
    client: &Client,
    endpoint: &str,
    api_token: &str,
    source_name: &str,
    max_retries: usize,
) -> Result<Value> {
    let builder = client
        .get(endpoint)
        .header("Authorization", format!("Bearer {}", api_token))
        .header("Accept", "application/json");
    let response = send_request_with_retry(builder, max_retries).await?;

    let body = response.text().await.map_err(|e| e.without_url())?;
    serde_json::from_str(&body)
        .map_err(|e| ClientError::format(source_name, format!("invalid JSON: {}", e)))
}
