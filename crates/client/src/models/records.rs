//! Service records produced by data sources.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One service as reported by a data source.
///
/// Records are immutable once produced; merging across sources builds a new
/// record rather than mutating the originals in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRecord {
    /// Unique identifier within a source (service name or page title).
    pub id: String,
    /// Named numeric metrics, e.g. `score`, `gemini_position`.
    #[serde(default)]
    pub metrics: BTreeMap<String, f64>,
    /// Name of the source that produced the record; `+`-joined after merging.
    pub source: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub description: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ServiceRecord {
    pub fn new(id: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            metrics: BTreeMap::new(),
            source: source.into(),
            description: Vec::new(),
            url: None,
        }
    }

    pub fn with_metric(mut self, name: impl Into<String>, value: f64) -> Self {
        self.metrics.insert(name.into(), value);
        self
    }

    pub fn with_description(mut self, line: impl Into<String>) -> Self {
        self.description.push(line.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Value of a named metric, if present.
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied()
    }
}

/// A record that was left out of the result, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordWarning {
    /// Source the record came from.
    pub source: String,
    /// Position of the record in the source payload (0-based).
    pub index: usize,
    /// Identifier, when one could be read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub reason: String,
}

impl RecordWarning {
    pub fn new(
        source: impl Into<String>,
        index: usize,
        id: Option<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            index,
            id,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for RecordWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.id {
            Some(id) => write!(
                f,
                "{} record #{} ('{}') skipped: {}",
                self.source, self.index, id, self.reason
            ),
            None => write!(
                f,
                "{} record #{} skipped: {}",
                self.source, self.index, self.reason
            ),
        }
    }
}

/// Everything a single fetch produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchOutcome {
    pub records: Vec<ServiceRecord>,
    pub warnings: Vec<RecordWarning>,
}

impl FetchOutcome {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.warnings.is_empty()
    }
}

/// A fetch outcome tagged with the name of the source that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceOutcome {
    pub source: String,
    pub outcome: FetchOutcome,
}
