//! Parsing of the generic service-record document shared by the `http` and
//! `file` sources.
//!
//! Accepted document shapes: a JSON array of records, or an object with a
//! `services` array. Each record looks like
//! `{"id": "...", "metrics": {"name": 1.5 | "1.5"}, "description": "..." | [...], "url": "..."}`.
//!
//! A malformed document is a `SourceFormat` error; a malformed record is a
//! `RecordWarning` and the rest of the document is still used.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::endpoints::gemini::json_kind;
use crate::error::{ClientError, Result};
use crate::models::{FetchOutcome, RecordWarning, ServiceRecord};

/// Deserialize either a single string or a list of strings into a list.
pub(crate) fn string_or_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(line)) => vec![line],
        Some(OneOrMany::Many(lines)) => lines,
    })
}

/// Split a records document into records and per-record warnings.
pub fn parse_records_document(source_name: &str, document: Value) -> Result<FetchOutcome> {
    let items = match document {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("services") {
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(ClientError::format(
                    source_name,
                    format!("'services' must be an array, got {}", json_kind(&other)),
                ));
            }
            None => {
                return Err(ClientError::format(
                    source_name,
                    "expected an array of records or an object with a 'services' array",
                ));
            }
        },
        other => {
            return Err(ClientError::format(
                source_name,
                format!("expected an array of records, got {}", json_kind(&other)),
            ));
        }
    };

    let mut outcome = FetchOutcome::default();
    for (index, item) in items.iter().enumerate() {
        match parse_record(source_name, item) {
            Ok(record) => outcome.records.push(record),
            Err((id, reason)) => outcome
                .warnings
                .push(RecordWarning::new(source_name, index, id, reason)),
        }
    }
    Ok(outcome)
}

type RecordError = (Option<String>, String);

fn parse_record(source_name: &str, item: &Value) -> std::result::Result<ServiceRecord, RecordError> {
    let obj = item
        .as_object()
        .ok_or_else(|| (None, format!("record is {}, not an object", json_kind(item))))?;

    let id = obj
        .get("id")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| (None, "missing or empty 'id'".to_string()))?
        .to_string();

    let fail = |reason: String| (Some(id.clone()), reason);

    let metrics = parse_metrics(obj).map_err(fail)?;
    let description = parse_description(obj).map_err(fail)?;
    let url = match obj.get("url") {
        None | Some(Value::Null) => None,
        Some(Value::String(url)) => Some(url.trim().to_string()).filter(|u| !u.is_empty()),
        Some(other) => {
            return Err(fail(format!(
                "'url' must be a string, got {}",
                json_kind(other)
            )));
        }
    };

    Ok(ServiceRecord {
        id,
        metrics,
        source: source_name.to_string(),
        description,
        url,
    })
}

fn parse_metrics(obj: &Map<String, Value>) -> std::result::Result<BTreeMap<String, f64>, String> {
    match obj.get("metrics") {
        None | Some(Value::Null) => Ok(BTreeMap::new()),
        Some(Value::Object(raw)) => raw
            .iter()
            .map(|(name, value)| {
                metric_value(value)
                    .map(|v| (name.clone(), v))
                    .ok_or_else(|| format!("metric '{}' is not numeric", name))
            })
            .collect(),
        Some(other) => Err(format!(
            "'metrics' must be an object, got {}",
            json_kind(other)
        )),
    }
}

/// A finite number, given either as a JSON number or a numeric string.
fn metric_value(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

fn parse_description(obj: &Map<String, Value>) -> std::result::Result<Vec<String>, String> {
    match obj.get("description") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::String(line)) => Ok(vec![line.clone()]),
        Some(Value::Array(lines)) => lines
            .iter()
            .map(|line| {
                line.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| "'description' must contain only strings".to_string())
            })
            .collect(),
        Some(other) => Err(format!(
            "'description' must be a string or a list of strings, got {}",
            json_kind(other)
        )),
    }
}
