//! Ranked report types.

use serde::{Deserialize, Serialize};

use super::records::{RecordWarning, ServiceRecord};

/// One row of the top-N report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    /// 1-based, gap-free position.
    pub rank: usize,
    pub id: String,
    /// Value of the selected metric for this record.
    pub metric: f64,
    pub record: ServiceRecord,
}

/// The ranked report handed to formatters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopServicesResult {
    /// Name of the metric the entries are ordered by.
    pub metric: String,
    /// Requested size; `entries.len() <= top_n`.
    pub top_n: usize,
    pub entries: Vec<RankedEntry>,
    /// Records excluded from ranking, with reasons.
    #[serde(default)]
    pub skipped: Vec<RecordWarning>,
}

impl TopServicesResult {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
