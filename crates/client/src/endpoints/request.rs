//! Retry helper for HTTP requests with exponential backoff.
//!
//! Retries cover transient failures only: HTTP 429/502/503/504 and
//! connect/timeout transport errors. With `max_retries = 0` a request is sent
//! exactly once.

use reqwest::{RequestBuilder, Response};
use serde::Deserialize;
use tracing::debug;

use crate::error::{ClientError, Result};

/// Google-style error envelope: `{"error": {"message": "..."}}`.
#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Sends an HTTP request, retrying transient failures.
///
/// - Exponential backoff between attempts (1s, 2s, 4s = 2^attempt)
/// - Logs retry attempts with `tracing::debug`
/// - Non-retryable failures are returned immediately
///
/// # Errors
///
/// Returns `ClientError::MaxRetriesExceeded` wrapping the last failure when
/// every retry failed, `ClientError::ApiError` for non-success responses and
/// `ClientError::HttpError` for transport errors.
pub async fn send_request_with_retry(
    builder: RequestBuilder,
    max_retries: usize,
) -> Result<Response> {
    let mut attempt = 0;
    loop {
        let attempt_builder = match builder.try_clone() {
            Some(cloned) => cloned,
            None => {
                debug!("Request builder cannot be cloned, single attempt only");
                let response = builder.send().await.map_err(|e| e.without_url())?;
                return check_status(response).await;
            }
        };

        let result = match attempt_builder.send().await {
            Ok(response) => check_status(response).await,
            Err(e) => Err(ClientError::from(e.without_url())),
        };

        match result {
            Ok(response) => {
                if attempt > 0 {
                    debug!(attempt = attempt + 1, "Request succeeded after retry");
                }
                return Ok(response);
            }
            Err(err) if err.is_retryable() && attempt < max_retries => {
                let backoff_secs = 2u64.pow(attempt as u32);
                debug!(
                    attempt = attempt + 1,
                    max_retries = max_retries + 1,
                    backoff_secs = backoff_secs,
                    error = %err,
                    "Transient failure, retrying with exponential backoff"
                );
                tokio::time::sleep(tokio::time::Duration::from_secs(backoff_secs)).await;
                attempt += 1;
            }
            Err(err) if err.is_retryable() && max_retries > 0 => {
                debug!(attempts = attempt + 1, "Max retries exhausted");
                return Err(ClientError::MaxRetriesExceeded {
                    attempts: attempt + 1,
                    last: Box::new(err),
                });
            }
            Err(err) => return Err(err),
        }
    }
}

/// Turn a non-success response into `ClientError::ApiError`.
async fn check_status(response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let url = redact_query(response.url());
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error response body".to_string());

    let message = match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(envelope) if !envelope.error.message.is_empty() => envelope.error.message,
        _ => body,
    };

    Err(ClientError::ApiError {
        status,
        url,
        message,
    })
}

/// URL without its query string; search requests carry the API key there.
/// Transport errors get the same treatment through `reqwest::Error::without_url`.
fn redact_query(url: &reqwest::Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.to_string()
}
