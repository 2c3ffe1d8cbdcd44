//! Configuration management for top-services.
//!
//! This crate turns `.env` files, environment variables and CLI overrides
//! into a single immutable [`Config`] snapshot that the rest of the pipeline
//! consumes by reference.

pub mod constants;
mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use types::{
    CacheConfig, Config, ConnectionConfig, FileSourceConfig, GeminiConfig, HttpSourceConfig,
    RankingConfig, SearchConfig, SourceConfig, SourceKind, VerifyConfig,
};
