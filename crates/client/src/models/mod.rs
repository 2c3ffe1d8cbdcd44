//! Data models for service records, ranking results and source payloads.
//!
//! Types are organized by concern in submodules and re-exported here
//! for convenient access.

pub mod gemini;
pub mod ranking;
pub mod recall;
pub mod records;
pub mod search;

pub use gemini::{
    GeminiService, GenerateContentResponse, ServiceAccuracy, ServiceDetail, ServiceKnowledge,
};
pub use ranking::{RankedEntry, TopServicesResult};
pub use recall::{ComparisonRow, RecallReport};
pub use records::{FetchOutcome, RecordWarning, ServiceRecord, SourceOutcome};
pub use search::{SearchItem, SearchResponse};
