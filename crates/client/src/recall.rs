//! Comparison of recalled services against web search results.
//!
//! A recalled service counts as found when its name occurs, ignoring case,
//! in the title or snippet of any search result.

use std::collections::BTreeSet;

use crate::models::{ComparisonRow, RecallReport, ServiceRecord};

/// Compare the model's services with search results.
///
/// `gemini` and `search` are expected in their source order; the rows pair
/// them by position and pad the shorter side with `None`.
pub fn compare_recall(gemini: &[ServiceRecord], search: &[ServiceRecord]) -> RecallReport {
    let rows = (0..gemini.len().max(search.len()))
        .map(|i| ComparisonRow {
            position: i + 1,
            gemini: gemini.get(i).map(|r| r.id.clone()),
            search: search.get(i).map(|r| r.id.clone()),
        })
        .collect();

    let haystacks: Vec<(String, Vec<String>)> = search
        .iter()
        .map(|r| {
            let mut texts = vec![r.id.to_lowercase()];
            texts.extend(r.description.iter().map(|d| d.to_lowercase()));
            (r.id.clone(), texts)
        })
        .collect();
    let needles: Vec<(String, String)> = gemini
        .iter()
        .map(|r| (r.id.clone(), r.id.to_lowercase()))
        .filter(|(_, needle)| !needle.is_empty())
        .collect();

    let mut both = BTreeSet::new();
    let mut gemini_only = BTreeSet::new();
    for (name, needle) in &needles {
        let found = haystacks
            .iter()
            .any(|(_, texts)| texts.iter().any(|t| t.contains(needle.as_str())));
        if found {
            both.insert(name.clone());
        } else {
            gemini_only.insert(name.clone());
        }
    }

    let search_only: BTreeSet<String> = haystacks
        .iter()
        .filter(|(_, texts)| {
            !needles
                .iter()
                .any(|(_, needle)| texts.iter().any(|t| t.contains(needle.as_str())))
        })
        .map(|(title, _)| title.clone())
        .collect();

    RecallReport {
        rows,
        both: both.into_iter().collect(),
        gemini_only: gemini_only.into_iter().collect(),
        search_only: search_only.into_iter().collect(),
    }
}
