//! Catalogue verification source.
//!
//! Responsibilities:
//! - Ask the model which services of a local catalogue it knows.
//! - Ask for the details of the known ones, then have the model grade them.
//! - Emit one record per catalogued service with `know` and `accuracy` metrics.
//!
//! Does NOT handle:
//! - Ranking or merging (see `ranking` and `aggregate`).
//!
//! Invariants:
//! - Every catalogued service yields exactly one record.
//! - Unknown or ungraded services get `accuracy = 0`.
//! - The three model requests run in sequence inside one fetch timeout.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::io::ErrorKind;
use std::ops::RangeInclusive;
use top_services_config::VerifyConfig;
use tracing::debug;

use crate::endpoints::gemini::json_kind;
use crate::endpoints::{self, AnswerSchema};
use crate::error::{ClientError, Result};
use crate::models::{
    FetchOutcome, RecordWarning, ServiceAccuracy, ServiceDetail, ServiceKnowledge, ServiceRecord,
};
use crate::sources::DataSource;

pub const NAME: &str = "verify";

/// 1 when the model knows the service, 0 otherwise.
pub const KNOW_METRIC: &str = "know";

/// Grade of the model's claims: 1 (nothing right) to 4 (all right), 0 when ungraded.
pub const ACCURACY_METRIC: &str = "accuracy";

const ACCURACY_GRADES: RangeInclusive<f64> = 1.0..=4.0;

/// Checks what the model knows about a catalogue of services.
pub struct VerifySource {
    http: Client,
    config: VerifyConfig,
    max_retries: usize,
}

impl VerifySource {
    pub fn new(http: Client, config: VerifyConfig, max_retries: usize) -> Self {
        Self {
            http,
            config,
            max_retries,
        }
    }

    /// Prompt asking whether each catalogued service is known.
    pub fn knowledge_prompt(&self, names: &[String]) -> String {
        format!(
            "Do you know the following {category}?\n{names}\n\nFor each one, give its name \
             as service_name and answer know with true if you know it or false if you do not. \
             Answer only from your own knowledge; do not perform any web search. Write the \
             answer in {language}.",
            category = self.config.gemini.category,
            names = names.join(", "),
            language = self.config.gemini.language,
        )
    }

    /// Prompt asking for the official site, company and description of each service.
    pub fn details_prompt(&self, names: &[String]) -> String {
        format!(
            "For each of the following {category}, give its name as service_name, the url of \
             its official site as url, the company that provides it as company and a few short \
             points about it as explanation:\n{names}\n\nAnswer only from your own knowledge; \
             do not perform any web search. Answer None for anything you do not know. Write \
             the answer in {language}.",
            category = self.config.gemini.category,
            names = names.join(", "),
            language = self.config.gemini.language,
        )
    }

    /// Prompt asking the model to grade previously claimed details.
    pub fn accuracy_prompt(&self, details: &[Value]) -> String {
        format!(
            "The following is what a language model answered about some {category}:\n\n\
             {details}\n\nFor each service, check whether the url of the official site, the \
             company and the explanation are correct, and grade it as score next to its \
             service_name: 1 if nothing is correct, 2 if only the company or only the url is \
             correct, 3 if the company and the url are correct, 4 if everything is correct. \
             Write the answer in {language}.",
            category = self.config.gemini.category,
            details = Value::Array(details.to_vec()),
            language = self.config.gemini.language,
        )
    }

    async fn read_catalogue(&self) -> Result<(Vec<String>, Vec<RecordWarning>)> {
        let path = &self.config.catalogue_file;
        debug!(path = %path.display(), "Reading service catalogue");

        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            let message = match e.kind() {
                ErrorKind::NotFound => format!("catalogue not found: {}", path.display()),
                _ => format!("cannot read {}: {}", path.display(), e),
            };
            ClientError::unavailable(NAME, message)
        })?;

        let document = serde_json::from_str(&content)
            .map_err(|e| ClientError::format(NAME, format!("invalid catalogue JSON: {}", e)))?;
        parse_catalogue(document)
    }

    async fn ask(&self, prompt: &str, schema: AnswerSchema) -> Result<Vec<Value>> {
        endpoints::generate_json_array(
            &self.http,
            &self.config.gemini,
            prompt,
            schema,
            NAME,
            self.max_retries,
        )
        .await
    }
}

#[async_trait]
impl DataSource for VerifySource {
    fn name(&self) -> &str {
        NAME
    }

    async fn fetch_all(&self) -> Result<FetchOutcome> {
        let (catalogue, mut warnings) = self.read_catalogue().await?;
        if catalogue.is_empty() {
            debug!("Catalogue is empty, skipping verification requests");
            return Ok(FetchOutcome {
                records: Vec::new(),
                warnings,
            });
        }

        let answers = self
            .ask(&self.knowledge_prompt(&catalogue), AnswerSchema::Knowledge)
            .await?;
        let known = known_services(&catalogue, answers);
        debug!(
            catalogue = catalogue.len(),
            known = known.len(),
            "Model knowledge checked"
        );

        let mut details = HashMap::new();
        let mut grades = HashMap::new();
        if !known.is_empty() {
            let claimed = self
                .ask(&self.details_prompt(&known), AnswerSchema::Details)
                .await?;
            details = index_details(&claimed);
            let graded = self
                .ask(&self.accuracy_prompt(&claimed), AnswerSchema::Accuracy)
                .await?;
            grades = index_grades(graded, &mut warnings);
        }

        Ok(FetchOutcome {
            records: verification_records(&catalogue, &known, &details, &grades),
            warnings,
        })
    }
}

fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Service names from a catalogue document: an array (or `{"services": [...]}`)
/// of names or of objects with an `id` or `service_name`.
///
/// Blank and non-name entries become warnings; repeated names are dropped.
pub fn parse_catalogue(document: Value) -> Result<(Vec<String>, Vec<RecordWarning>)> {
    let items = match document {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("services") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(ClientError::format(
                    NAME,
                    "catalogue object must hold a 'services' array",
                ));
            }
        },
        other => {
            return Err(ClientError::format(
                NAME,
                format!("expected a catalogue array, got {}", json_kind(&other)),
            ));
        }
    };

    let mut names = Vec::new();
    let mut seen = HashSet::new();
    let mut warnings = Vec::new();

    for (index, item) in items.iter().enumerate() {
        let name = match item {
            Value::String(name) => Some(name.as_str()),
            Value::Object(map) => map
                .get("id")
                .or_else(|| map.get("service_name"))
                .and_then(Value::as_str),
            _ => None,
        };
        let Some(name) = name else {
            warnings.push(RecordWarning::new(
                NAME,
                index,
                None,
                format!("catalogue entry is {}, not a service name", json_kind(item)),
            ));
            continue;
        };

        let name = name.trim();
        if name.is_empty() {
            warnings.push(RecordWarning::new(NAME, index, None, "blank service name"));
            continue;
        }
        if seen.insert(name_key(name)) {
            names.push(name.to_string());
        } else {
            debug!(service = name, "Dropping repeated catalogue entry");
        }
    }

    Ok((names, warnings))
}

/// Catalogued names the model says it knows, in catalogue order.
///
/// Answers without a name or without a `know` verdict are ignored, as are
/// names outside the catalogue.
pub fn known_services(catalogue: &[String], answers: Vec<Value>) -> Vec<String> {
    let known: HashSet<String> = answers
        .into_iter()
        .filter_map(|item| serde_json::from_value::<ServiceKnowledge>(item).ok())
        .filter(|answer| answer.know == Some(true) && !answer.service_name.trim().is_empty())
        .map(|answer| name_key(&answer.service_name))
        .collect();

    catalogue
        .iter()
        .filter(|name| known.contains(&name_key(name)))
        .cloned()
        .collect()
}

fn index_details(claimed: &[Value]) -> HashMap<String, ServiceDetail> {
    let mut details = HashMap::new();
    for item in claimed {
        match serde_json::from_value::<ServiceDetail>(item.clone()) {
            Ok(detail) if !detail.service_name.trim().is_empty() => {
                details
                    .entry(name_key(&detail.service_name))
                    .or_insert(detail);
            }
            Ok(_) => debug!("Ignoring service detail without a name"),
            Err(e) => debug!(error = %e, "Ignoring malformed service detail"),
        }
    }
    details
}

fn index_grades(graded: Vec<Value>, warnings: &mut Vec<RecordWarning>) -> HashMap<String, f64> {
    let mut grades = HashMap::new();
    for (index, item) in graded.into_iter().enumerate() {
        let Ok(grade) = serde_json::from_value::<ServiceAccuracy>(item) else {
            debug!(index, "Ignoring malformed accuracy grade");
            continue;
        };
        let name = grade.service_name.trim();
        let Some(score) = grade.score else {
            continue;
        };
        if name.is_empty() {
            continue;
        }
        if !ACCURACY_GRADES.contains(&score) {
            warnings.push(RecordWarning::new(
                NAME,
                index,
                Some(name.to_string()),
                format!("accuracy score {} is outside 1..=4", score),
            ));
            continue;
        }
        grades.entry(name_key(name)).or_insert(score);
    }
    grades
}

/// One record per catalogued service.
fn verification_records(
    catalogue: &[String],
    known: &[String],
    details: &HashMap<String, ServiceDetail>,
    grades: &HashMap<String, f64>,
) -> Vec<ServiceRecord> {
    let known: HashSet<String> = known.iter().map(|name| name_key(name)).collect();

    catalogue
        .iter()
        .map(|name| {
            let key = name_key(name);
            let knows = known.contains(&key);
            let accuracy = if knows {
                grades.get(&key).copied().unwrap_or(0.0)
            } else {
                0.0
            };

            let mut record = ServiceRecord::new(name.as_str(), NAME)
                .with_metric(KNOW_METRIC, if knows { 1.0 } else { 0.0 })
                .with_metric(ACCURACY_METRIC, accuracy);
            if knows && let Some(detail) = details.get(&key) {
                record.description = detail.explanation.clone();
                record.url = detail.known_url().map(str::to_string);
            }
            record
        })
        .collect()
}
