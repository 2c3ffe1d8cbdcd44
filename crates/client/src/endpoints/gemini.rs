//! `generateContent` endpoint for structured answers about services.

use reqwest::Client;
use secrecy::ExposeSecret;
use serde_json::{Value, json};
use top_services_config::GeminiConfig;
use tracing::debug;

use crate::endpoints::send_request_with_retry;
use crate::error::{ClientError, Result};
use crate::models::GenerateContentResponse;

/// Shape of the JSON array the model is asked to answer with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerSchema {
    /// `[{service_name, explanation[]}]`
    Recall,
    /// `[{service_name, know}]`
    Knowledge,
    /// `[{service_name, url, company, explanation[]}]`
    Details,
    /// `[{service_name, score}]`
    Accuracy,
}

impl AnswerSchema {
    fn item_schema(self) -> Value {
        let string = json!({"type": "STRING"});
        let string_list = json!({"type": "ARRAY", "items": {"type": "STRING"}});
        let (properties, required) = match self {
            AnswerSchema::Recall => (
                json!({"service_name": string, "explanation": string_list}),
                json!(["service_name", "explanation"]),
            ),
            AnswerSchema::Knowledge => (
                json!({"service_name": string, "know": {"type": "BOOLEAN"}}),
                json!(["service_name", "know"]),
            ),
            AnswerSchema::Details => (
                json!({
                    "service_name": string,
                    "url": string,
                    "company": string,
                    "explanation": string_list
                }),
                json!(["service_name", "url", "company", "explanation"]),
            ),
            AnswerSchema::Accuracy => (
                json!({"service_name": string, "score": {"type": "NUMBER"}}),
                json!(["service_name", "score"]),
            ),
        };
        json!({"type": "OBJECT", "properties": properties, "required": required})
    }
}

/// Request body for a deterministic JSON array answer shaped by `schema`.
pub fn build_request_body(prompt: &str, schema: AnswerSchema) -> Value {
    json!({
        "contents": [
            {"role": "user", "parts": [{"text": prompt}]}
        ],
        "generationConfig": {
            "temperature": 0,
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "ARRAY",
                "items": schema.item_schema()
            }
        }
    })
}

/// Ask the model and return the raw items of its JSON array answer.
///
/// `source` names the adapter in the errors this raises.
///
/// # Errors
///
/// `ClientError::SourceFormat` when the response has no text part or the
/// text is not a JSON array. Transport and status errors come from
/// [`send_request_with_retry`].
pub async fn generate_json_array(
    client: &Client,
    config: &GeminiConfig,
    prompt: &str,
    schema: AnswerSchema,
    source: &str,
    max_retries: usize,
) -> Result<Vec<Value>> {
    let url = format!(
        "{}/v1beta/models/{}:generateContent",
        config.base_url, config.model
    );
    debug!(model = %config.model, schema = ?schema, "Requesting structured answer");

    let builder = client
        .post(&url)
        .header("x-goog-api-key", config.api_key.expose_secret())
        .json(&build_request_body(prompt, schema));
    let response = send_request_with_retry(builder, max_retries).await?;

    let body = response.text().await.map_err(|e| e.without_url())?;
    let parsed: GenerateContentResponse = serde_json::from_str(&body)
        .map_err(|e| ClientError::format(source, format!("invalid response JSON: {}", e)))?;

    let text = parsed
        .first_text()
        .ok_or_else(|| ClientError::format(source, "response contains no text candidate"))?;

    match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(items)) => Ok(items),
        Ok(other) => Err(ClientError::format(
            source,
            format!("expected a JSON array answer, got {}", json_kind(&other)),
        )),
        Err(e) => Err(ClientError::format(
            source,
            format!("answer is not valid JSON: {}", e),
        )),
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
