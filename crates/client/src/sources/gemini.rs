//! Generative recall source: asks the model which services are best known.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use top_services_config::GeminiConfig;
use tracing::debug;

use crate::endpoints::{self, AnswerSchema};
use crate::error::Result;
use crate::models::{FetchOutcome, GeminiService, RecordWarning, ServiceRecord};
use crate::sources::DataSource;

pub const NAME: &str = "gemini";

/// Recalls the `top_n` best-known services of a category from model knowledge.
pub struct GeminiSource {
    http: Client,
    config: GeminiConfig,
    top_n: usize,
    max_retries: usize,
}

impl GeminiSource {
    pub fn new(http: Client, config: GeminiConfig, top_n: usize, max_retries: usize) -> Self {
        Self {
            http,
            config,
            top_n,
            max_retries,
        }
    }

    /// Prompt sent to the model.
    pub fn prompt(&self) -> String {
        format!(
            "List the top {top_n} most typical {category} used in {region}, ordered from the \
             most to the least well known. Answer only from your own knowledge; do not perform \
             any web search. For each service give its name as service_name and a few short \
             points about it as explanation. Write the answer in {language}.",
            top_n = self.top_n,
            category = self.config.category,
            region = self.config.region,
            language = self.config.language,
        )
    }
}

#[async_trait]
impl DataSource for GeminiSource {
    fn name(&self) -> &str {
        NAME
    }

    async fn fetch_all(&self) -> Result<FetchOutcome> {
        if self.top_n == 0 {
            debug!("top_n is 0, skipping recall request");
            return Ok(FetchOutcome::default());
        }

        let items = endpoints::generate_json_array(
            &self.http,
            &self.config,
            &self.prompt(),
            AnswerSchema::Recall,
            NAME,
            self.max_retries,
        )
        .await?;

        Ok(records_from_services(items))
    }
}

/// Turn the model's ordered answer into records scored by position.
///
/// Item `i` of `n` gets `score = n - i` and `gemini_position = i + 1`.
pub fn records_from_services(items: Vec<Value>) -> FetchOutcome {
    let total = items.len();
    let mut outcome = FetchOutcome::default();

    for (index, item) in items.into_iter().enumerate() {
        let service: GeminiService = match serde_json::from_value(item) {
            Ok(service) => service,
            Err(e) => {
                outcome.warnings.push(RecordWarning::new(
                    NAME,
                    index,
                    None,
                    format!("not a service object: {}", e),
                ));
                continue;
            }
        };

        let name = service.service_name.trim();
        if name.is_empty() {
            outcome.warnings.push(RecordWarning::new(
                NAME,
                index,
                None,
                "missing service_name",
            ));
            continue;
        }

        let mut record = ServiceRecord::new(name, NAME)
            .with_metric("score", (total - index) as f64)
            .with_metric("gemini_position", (index + 1) as f64);
        record.description = service.explanation;
        outcome.records.push(record);
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;
    use serde_json::json;

    #[test]
    fn test_position_scores() {
        let outcome = records_from_services(vec![
            json!({"service_name": "Tableau", "explanation": ["Visual analytics"]}),
            json!({"service_name": "Power BI", "explanation": []}),
            json!({"service_name": "Looker", "explanation": "Google"}),
        ]);

        assert!(outcome.warnings.is_empty());
        let scores: Vec<_> = outcome
            .records
            .iter()
            .map(|r| (r.id.as_str(), r.metric("score"), r.metric("gemini_position")))
            .collect();
        assert_eq!(
            scores,
            vec![
                ("Tableau", Some(3.0), Some(1.0)),
                ("Power BI", Some(2.0), Some(2.0)),
                ("Looker", Some(1.0), Some(3.0)),
            ]
        );
        assert_eq!(outcome.records[0].description, vec!["Visual analytics"]);
        assert_eq!(outcome.records[2].description, vec!["Google"]);
    }

    #[test]
    fn test_blank_names_and_non_objects_are_warnings() {
        let outcome = records_from_services(vec![
            json!({"service_name": "  ", "explanation": []}),
            json!(42),
            json!({"service_name": "Domo"}),
        ]);

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].metric("score"), Some(1.0));
        assert_eq!(outcome.warnings.len(), 2);
        assert_eq!(outcome.warnings[0].reason, "missing service_name");
        assert_eq!(outcome.warnings[1].index, 1);
    }

    #[test]
    fn test_prompt_mentions_settings() {
        let source = GeminiSource::new(
            Client::new(),
            GeminiConfig {
                api_key: SecretString::new("k".to_string().into()),
                base_url: "http://localhost".to_string(),
                model: "m".to_string(),
                category: "CRM tools".to_string(),
                region: "Germany".to_string(),
                language: "German".to_string(),
            },
            15,
            0,
        );

        let prompt = source.prompt();
        assert!(prompt.contains("top 15"));
        assert!(prompt.contains("CRM tools"));
        assert!(prompt.contains("Germany"));
        assert!(prompt.contains("in German"));
        assert!(prompt.contains("web search"));
    }
}
