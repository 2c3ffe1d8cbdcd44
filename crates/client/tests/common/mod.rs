//! Common test utilities for integration tests.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//! - All fixture files must be valid JSON
//!
//! # What this does NOT handle
//! - Mock server setup (use wiremock directly in tests)

#[allow(unused_imports)]
pub use top_services_client::testing::{StaticSource, fixture_path_buf, load_fixture};

#[allow(unused_imports)]
pub use reqwest::Client;
#[allow(unused_imports)]
pub use top_services_client::endpoints;
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

use secrecy::SecretString;
use std::path::PathBuf;
use top_services_config::{GeminiConfig, HttpSourceConfig, SearchConfig, VerifyConfig};

/// Gemini settings pointing at a mock server.
#[allow(dead_code)]
pub fn gemini_config(base_url: &str) -> GeminiConfig {
    GeminiConfig {
        api_key: SecretString::new("test-gemini-key".to_string().into()),
        base_url: base_url.to_string(),
        model: "gemini-2.0-flash".to_string(),
        category: "BI tools".to_string(),
        region: "Japan".to_string(),
        language: "Japanese".to_string(),
    }
}

/// Search settings pointing at a mock server's `/customsearch/v1`.
#[allow(dead_code)]
pub fn search_config(server_uri: &str, num_results: usize) -> SearchConfig {
    SearchConfig {
        api_key: SecretString::new("test-search-key".to_string().into()),
        cx_id: "test-cx".to_string(),
        base_url: format!("{}/customsearch/v1", server_uri),
        query: "BIツール 公式サイト".to_string(),
        num_results,
    }
}

/// Generic endpoint settings pointing at a mock server's `/services`.
#[allow(dead_code)]
pub fn http_config(server_uri: &str) -> HttpSourceConfig {
    HttpSourceConfig {
        endpoint: format!("{}/services", server_uri),
        api_token: SecretString::new("test-token".to_string().into()),
    }
}

/// Verification settings pointing at a mock server and a catalogue file.
#[allow(dead_code)]
pub fn verify_config(base_url: &str, catalogue_file: PathBuf) -> VerifyConfig {
    VerifyConfig {
        gemini: gemini_config(base_url),
        catalogue_file,
    }
}

/// A `generateContent` response whose answer text is `answer` serialized.
#[allow(dead_code)]
pub fn gemini_answer(answer: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "candidates": [{"content": {"parts": [{"text": answer.to_string()}]}}]
    }))
}
