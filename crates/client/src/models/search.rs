//! Wire types for the Custom Search JSON API.

use serde::{Deserialize, Serialize};

/// One page of search results. `items` is absent when the page is empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Option<Vec<serde_json::Value>>,
}

/// The fields of a search result the pipeline uses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchItem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
}
