//! Wire types for the `generateContent` API.
//!
//! Only the fields the recall and verify sources read are modeled; everything
//! else in the response is ignored.

use serde::Deserialize;

/// Top-level `generateContent` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}

/// One service in the model's structured answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GeminiService {
    #[serde(default)]
    pub service_name: String,
    #[serde(default, deserialize_with = "crate::sources::records::string_or_list")]
    pub explanation: Vec<String>,
}

/// Whether the model knows a catalogued service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServiceKnowledge {
    #[serde(default)]
    pub service_name: String,
    #[serde(default)]
    pub know: Option<bool>,
}

/// What the model claims about a service it knows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServiceDetail {
    #[serde(default)]
    pub service_name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "crate::sources::records::string_or_list")]
    pub explanation: Vec<String>,
}

impl ServiceDetail {
    /// The claimed url, unless the model left it blank or answered "None".
    pub fn known_url(&self) -> Option<&str> {
        self.url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty() && !url.eq_ignore_ascii_case("none"))
    }
}

/// Accuracy score for one service's claimed details.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ServiceAccuracy {
    #[serde(default)]
    pub service_name: String,
    #[serde(default)]
    pub score: Option<f64>,
}
