//! Remote API endpoint implementations.
//!
//! Each function takes a shared `reqwest::Client` plus the values it needs
//! and returns raw payload items; turning items into `ServiceRecord`s is the
//! job of the source adapters.

pub mod gemini;
mod records;
mod request;
pub mod search;

pub use gemini::{AnswerSchema, generate_json_array};
pub use records::fetch_records;
pub use request::send_request_with_retry;
pub use search::{collect_results, search_page};
