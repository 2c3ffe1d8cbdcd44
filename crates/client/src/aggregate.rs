//! Concurrent fetching and cross-source merging.
//!
//! Responsibilities:
//! - Run every source concurrently, each bounded by a timeout.
//! - Merge records that several sources report under the same id.
//!
//! Does NOT handle:
//! - Ordering or truncation (see `ranking`).
//!
//! Invariants:
//! - All sources must succeed; the first failure aborts the whole fetch.
//! - Outcomes are returned in source order regardless of completion order.
//! - Each source contributes at most one record per id to a merge, so the
//!   merged set does not depend on record order within a source.

use futures::future::try_join_all;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{ClientError, Result};
use crate::models::{FetchOutcome, ServiceRecord, SourceOutcome};
use crate::ranking::{MetricSelector, compare_for_rank};
use crate::sources::DataSource;

/// Fetch all `sources` concurrently, each within `timeout`.
pub async fn fetch_sources(
    sources: &[Box<dyn DataSource>],
    timeout: Duration,
) -> Result<Vec<SourceOutcome>> {
    let fetches = sources.iter().map(|source| fetch_one(source.as_ref(), timeout));
    try_join_all(fetches).await
}

async fn fetch_one(source: &dyn DataSource, timeout: Duration) -> Result<SourceOutcome> {
    let name = source.name().to_string();
    let outcome = match tokio::time::timeout(timeout, source.fetch_all()).await {
        Ok(result) => result?,
        Err(_) => {
            return Err(ClientError::Timeout {
                source_name: name,
                timeout,
            });
        }
    };

    if !outcome.warnings.is_empty() {
        warn!(
            source = %name,
            skipped = outcome.warnings.len(),
            "Source returned unreadable records"
        );
    }
    for warning in &outcome.warnings {
        debug!(
            source = %warning.source,
            index = warning.index,
            id = warning.id.as_deref().unwrap_or(""),
            "Skipping record: {}",
            warning.reason
        );
    }
    info!(
        source = %name,
        records = outcome.records.len(),
        skipped = outcome.warnings.len(),
        "Source fetched"
    );

    Ok(SourceOutcome {
        source: name,
        outcome,
    })
}

/// Merge per-source outcomes into one record set.
///
/// Repeats of an id within one source are collapsed first, keeping the
/// record `rank` would place highest under `selector`. The survivors are
/// then merged across sources: metric maps are unioned (summing shared
/// keys), descriptions concatenated, the first url kept and source names
/// joined with `+`.
pub fn merge_outcomes<S>(outcomes: Vec<SourceOutcome>, selector: &S) -> FetchOutcome
where
    S: MetricSelector + ?Sized,
{
    let mut records: Vec<ServiceRecord> = Vec::new();
    let mut by_id: HashMap<String, usize> = HashMap::new();
    let mut warnings = Vec::new();

    for source_outcome in outcomes {
        warnings.extend(source_outcome.outcome.warnings);

        for record in collapse_duplicates(source_outcome.outcome.records, selector) {
            match by_id.get(&record.id) {
                Some(&slot) => merge_into(&mut records[slot], record),
                None => {
                    by_id.insert(record.id.clone(), records.len());
                    records.push(record);
                }
            }
        }
    }

    FetchOutcome { records, warnings }
}

/// Keep one record per id, in first-seen order.
fn collapse_duplicates<S>(records: Vec<ServiceRecord>, selector: &S) -> Vec<ServiceRecord>
where
    S: MetricSelector + ?Sized,
{
    let mut kept: Vec<ServiceRecord> = Vec::with_capacity(records.len());
    let mut by_id: HashMap<String, usize> = HashMap::new();

    for record in records {
        match by_id.get(&record.id) {
            Some(&slot) => {
                debug!(
                    source = %record.source,
                    id = %record.id,
                    "Collapsing duplicate record"
                );
                if compare_for_rank(selector, &record, &kept[slot]) == Ordering::Less {
                    kept[slot] = record;
                }
            }
            None => {
                by_id.insert(record.id.clone(), kept.len());
                kept.push(record);
            }
        }
    }

    kept
}

fn merge_into(target: &mut ServiceRecord, other: ServiceRecord) {
    for (name, value) in other.metrics {
        *target.metrics.entry(name).or_insert(0.0) += value;
    }
    target.description.extend(other.description);
    if target.url.is_none() {
        target.url = other.url;
    }
    target.source = format!("{}+{}", target.source, other.source);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::NamedMetric;

    fn score() -> NamedMetric {
        NamedMetric::new("score")
    }

    fn outcome(source: &str, records: Vec<ServiceRecord>) -> SourceOutcome {
        SourceOutcome {
            source: source.to_string(),
            outcome: FetchOutcome {
                records,
                warnings: Vec::new(),
            },
        }
    }

    #[test]
    fn test_same_id_across_sources_is_merged() {
        let outcomes = vec![
            outcome(
                "gemini",
                vec![
                    ServiceRecord::new("Tableau", "gemini")
                        .with_metric("score", 3.0)
                        .with_metric("gemini_position", 1.0)
                        .with_description("Visual analytics"),
                ],
            ),
            outcome(
                "search",
                vec![
                    ServiceRecord::new("Tableau", "search")
                        .with_metric("score", 5.0)
                        .with_metric("search_position", 2.0)
                        .with_description("Official site")
                        .with_url("https://www.tableau.com"),
                ],
            ),
        ];
        let merged = merge_outcomes(outcomes, &score());

        assert_eq!(merged.records.len(), 1);
        let record = &merged.records[0];
        assert_eq!(record.source, "gemini+search");
        assert_eq!(record.metric("score"), Some(8.0));
        assert_eq!(record.metric("gemini_position"), Some(1.0));
        assert_eq!(record.metric("search_position"), Some(2.0));
        assert_eq!(record.description, vec!["Visual analytics", "Official site"]);
        assert_eq!(record.url.as_deref(), Some("https://www.tableau.com"));
    }

    #[test]
    fn test_duplicates_within_one_source_keep_highest_before_merge() {
        let file = |first: f64, second: f64| {
            outcome(
                "file",
                vec![
                    ServiceRecord::new("a", "file").with_metric("score", first),
                    ServiceRecord::new("a", "file").with_metric("score", second),
                ],
            )
        };
        let http = || {
            outcome(
                "http",
                vec![ServiceRecord::new("a", "http").with_metric("score", 10.0)],
            )
        };

        let forward = merge_outcomes(vec![file(1.0, 4.0), http()], &score());
        let backward = merge_outcomes(vec![file(4.0, 1.0), http()], &score());

        assert_eq!(forward.records, backward.records);
        assert_eq!(forward.records.len(), 1);
        assert_eq!(forward.records[0].source, "file+http");
        assert_eq!(forward.records[0].metric("score"), Some(14.0));
    }

    #[test]
    fn test_scored_duplicate_wins_over_unscored_one() {
        let merged = merge_outcomes(
            vec![outcome(
                "file",
                vec![
                    ServiceRecord::new("a", "file").with_metric("usage", 50.0),
                    ServiceRecord::new("a", "file").with_metric("score", 2.0),
                ],
            )],
            &score(),
        );

        assert_eq!(merged.records.len(), 1);
        assert_eq!(merged.records[0].metric("score"), Some(2.0));
        assert_eq!(merged.records[0].metric("usage"), None);
    }

    #[test]
    fn test_first_url_wins_and_warnings_are_kept() {
        let mut with_warning = outcome(
            "search",
            vec![ServiceRecord::new("x", "search").with_url("https://second.example")],
        );
        with_warning
            .outcome
            .warnings
            .push(crate::models::RecordWarning::new("search", 3, None, "missing title"));

        let outcomes = vec![
            outcome(
                "http",
                vec![ServiceRecord::new("x", "http").with_url("https://first.example")],
            ),
            with_warning,
        ];
        let merged = merge_outcomes(outcomes, &score());

        assert_eq!(merged.records[0].url.as_deref(), Some("https://first.example"));
        assert_eq!(merged.warnings.len(), 1);
    }
}
