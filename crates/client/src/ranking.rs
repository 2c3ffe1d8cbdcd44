//! Ranking of service records into a top-N report.
//!
//! Responsibilities:
//! - Evaluate a metric selector for every record.
//! - Order records by metric (descending) with a total, deterministic tie-break.
//! - Drop duplicate identifiers, truncate to `top_n`, assign gap-free ranks.
//!
//! Does NOT handle:
//! - Fetching or merging records (see `aggregate`).
//! - Rendering (see the CLI formatters).
//!
//! Invariants:
//! - `rank` is pure: the same multiset of records, selector and `top_n`
//!   always yields the same result, regardless of input order.
//! - Ranks are `1..=entries.len()` with no gaps.
//! - Records whose metric is missing or not finite are never ranked; they
//!   are reported in `TopServicesResult::skipped`.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::models::{RankedEntry, RecordWarning, ServiceRecord, TopServicesResult};

/// Extracts the ordering metric from a record.
pub trait MetricSelector {
    /// Name shown in report headers.
    fn name(&self) -> &str;

    /// Metric value, or `None` when the record does not carry it.
    fn select(&self, record: &ServiceRecord) -> Option<f64>;
}

/// Selects a metric by key from `ServiceRecord::metrics`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedMetric(pub String);

impl NamedMetric {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl MetricSelector for NamedMetric {
    fn name(&self) -> &str {
        &self.0
    }

    fn select(&self, record: &ServiceRecord) -> Option<f64> {
        record.metric(&self.0)
    }
}

impl<F> MetricSelector for F
where
    F: Fn(&ServiceRecord) -> Option<f64>,
{
    fn name(&self) -> &str {
        "metric"
    }

    fn select(&self, record: &ServiceRecord) -> Option<f64> {
        self(record)
    }
}

/// Rank `records` by `selector` and keep the best `top_n`.
pub fn rank<S>(records: &[ServiceRecord], selector: &S, top_n: usize) -> TopServicesResult
where
    S: MetricSelector + ?Sized,
{
    let mut scored: Vec<(f64, &ServiceRecord)> = Vec::with_capacity(records.len());
    let mut skipped = Vec::new();

    for (index, record) in records.iter().enumerate() {
        match selector.select(record) {
            Some(value) if value.is_finite() => scored.push((value, record)),
            Some(value) => skipped.push(RecordWarning::new(
                record.source.clone(),
                index,
                Some(record.id.clone()),
                format!("metric '{}' is not finite ({})", selector.name(), value),
            )),
            None => skipped.push(RecordWarning::new(
                record.source.clone(),
                index,
                Some(record.id.clone()),
                format!("metric '{}' is missing", selector.name()),
            )),
        }
    }

    scored.sort_by(|a, b| compare_scored(*a, *b));

    let mut seen: HashSet<&str> = HashSet::new();
    let entries: Vec<RankedEntry> = scored
        .into_iter()
        .filter(|(_, record)| seen.insert(record.id.as_str()))
        .take(top_n)
        .enumerate()
        .map(|(i, (metric, record))| RankedEntry {
            rank: i + 1,
            id: record.id.clone(),
            metric,
            record: record.clone(),
        })
        .collect();

    // Input order must not leak into the skipped list either.
    skipped.sort_by(|a, b| {
        a.source
            .cmp(&b.source)
            .then_with(|| a.id.cmp(&b.id))
            .then_with(|| a.reason.cmp(&b.reason))
            .then_with(|| a.index.cmp(&b.index))
    });

    TopServicesResult {
        metric: selector.name().to_string(),
        top_n,
        entries,
        skipped,
    }
}

/// Order two records the way `rank` would place them.
///
/// Records with a finite metric come before records without one.
pub(crate) fn compare_for_rank<S>(selector: &S, a: &ServiceRecord, b: &ServiceRecord) -> Ordering
where
    S: MetricSelector + ?Sized,
{
    let key = |record: &ServiceRecord| selector.select(record).filter(|v| v.is_finite());
    match (key(a), key(b)) {
        (Some(x), Some(y)) => compare_scored((x, a), (y, b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => compare_scored((0.0, a), (0.0, b)),
    }
}

/// Metric descending, then id ascending, then the rest of the record so
/// that equal-looking inputs always sort the same way.
fn compare_scored(a: (f64, &ServiceRecord), b: (f64, &ServiceRecord)) -> Ordering {
    b.0.total_cmp(&a.0)
        .then_with(|| a.1.id.cmp(&b.1.id))
        .then_with(|| a.1.source.cmp(&b.1.source))
        .then_with(|| a.1.description.cmp(&b.1.description))
        .then_with(|| a.1.url.cmp(&b.1.url))
        .then_with(|| compare_metrics(a.1, b.1))
}

fn compare_metrics(a: &ServiceRecord, b: &ServiceRecord) -> Ordering {
    let mut left = a.metrics.iter();
    let mut right = b.metrics.iter();
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some((lk, lv)), Some((rk, rv))) => {
                let ord = lk.cmp(rk).then_with(|| lv.total_cmp(rv));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}
