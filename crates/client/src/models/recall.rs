//! Recall comparison between model knowledge and web search results.

use serde::{Deserialize, Serialize};

/// Position-aligned pair of a recalled service and a search result title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRow {
    /// 1-based row number.
    pub position: usize,
    pub gemini: Option<String>,
    pub search: Option<String>,
}

/// How well the model's recalled services match what a web search finds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecallReport {
    pub rows: Vec<ComparisonRow>,
    /// Recalled services that appear in the search results.
    pub both: Vec<String>,
    /// Recalled services missing from the search results.
    pub gemini_only: Vec<String>,
    /// Search result titles that mention no recalled service.
    pub search_only: Vec<String>,
}
