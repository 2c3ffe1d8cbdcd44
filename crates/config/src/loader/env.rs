//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read and parse `TOP_SERVICES_*` and provider credential variables.
//! - Apply environment variable values to a ConfigLoader instance.
//! - Provide a helper for reading env vars with empty/whitespace filtering.
//!
//! Does NOT handle:
//! - Building or validating the final Config (see builder.rs).
//! - .env file loading (handled by ConfigLoader::load_dotenv).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Invalid numeric values return ConfigError::InvalidValue naming the variable.

use secrecy::SecretString;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_env<T: FromStr>(key: &str, message: &str) -> Result<Option<T>, ConfigError> {
    env_var_or_none(key)
        .map(|raw| raw.parse::<T>().map_err(|_| ConfigError::invalid(key, message)))
        .transpose()
}

fn secret_env(key: &str) -> Option<SecretString> {
    env_var_or_none(key).map(|value| SecretString::new(value.into()))
}

/// Split a comma-separated list, dropping blank entries.
pub(crate) fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Apply environment variable configuration to the loader.
///
/// Values already set through builder methods are left untouched.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if loader.sources.is_none() {
        if let Some(sources) = env_var_or_none("TOP_SERVICES_SOURCES") {
            loader.sources = Some(split_list(&sources));
        }
    }
    if loader.top_n.is_none() {
        loader.top_n = parse_env("TOP_SERVICES_TOP_N", "must be a non-negative integer")?;
    }
    if loader.metric.is_none() {
        loader.metric = env_var_or_none("TOP_SERVICES_METRIC");
    }
    if loader.timeout.is_none() {
        loader.timeout = parse_env::<u64>("TOP_SERVICES_TIMEOUT", "must be a number of seconds")?
            .map(Duration::from_secs);
    }
    if loader.max_retries.is_none() {
        loader.max_retries =
            parse_env("TOP_SERVICES_MAX_RETRIES", "must be a non-negative integer")?;
    }
    if loader.cache_dir.is_none() {
        loader.cache_dir = env_var_or_none("TOP_SERVICES_CACHE_DIR").map(PathBuf::from);
    }

    // Gemini
    if loader.gemini_api_key.is_none() {
        loader.gemini_api_key = secret_env("GEMINI_API_KEY");
    }
    if loader.gemini_model.is_none() {
        loader.gemini_model = env_var_or_none("TOP_SERVICES_GEMINI_MODEL");
    }
    if loader.gemini_base_url.is_none() {
        loader.gemini_base_url = env_var_or_none("TOP_SERVICES_GEMINI_BASE_URL");
    }
    if loader.category.is_none() {
        loader.category = env_var_or_none("TOP_SERVICES_CATEGORY");
    }
    if loader.region.is_none() {
        loader.region = env_var_or_none("TOP_SERVICES_REGION");
    }
    if loader.language.is_none() {
        loader.language = env_var_or_none("TOP_SERVICES_LANGUAGE");
    }

    // Custom Search
    if loader.search_api_key.is_none() {
        loader.search_api_key = secret_env("CUSTOM_SEARCH_API_KEY");
    }
    if loader.search_cx_id.is_none() {
        loader.search_cx_id = env_var_or_none("CX_ID_KEY");
    }
    if loader.search_query.is_none() {
        loader.search_query = env_var_or_none("TOP_SERVICES_SEARCH_QUERY");
    }
    if loader.search_results.is_none() {
        loader.search_results =
            parse_env("TOP_SERVICES_SEARCH_RESULTS", "must be a number between 1 and 100")?;
    }
    if loader.search_base_url.is_none() {
        loader.search_base_url = env_var_or_none("TOP_SERVICES_SEARCH_BASE_URL");
    }

    // Generic endpoint, files and catalogue
    if loader.endpoint.is_none() {
        loader.endpoint = env_var_or_none("TOP_SERVICES_ENDPOINT");
    }
    if loader.api_token.is_none() {
        loader.api_token = secret_env("TOP_SERVICES_API_TOKEN");
    }
    if loader.records_file.is_none() {
        loader.records_file = env_var_or_none("TOP_SERVICES_RECORDS_FILE").map(PathBuf::from);
    }
    if loader.catalogue_file.is_none() {
        loader.catalogue_file =
            env_var_or_none("TOP_SERVICES_CATALOGUE_FILE").map(PathBuf::from);
    }

    Ok(())
}
