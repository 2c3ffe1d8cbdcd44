//! Configuration assembly for command execution.
//!
//! Responsibilities:
//! - Apply CLI flag overrides on top of `.env` and environment values.
//! - Check command-specific source requirements.
//!
//! Does NOT handle:
//! - `.env` loading (done in `main()` before argument parsing).
//! - CLI argument definitions (see `args` module).
//!
//! Invariants:
//! - Every failure here is a `ConfigError` and happens before any network call.

use std::time::Duration;
use top_services_config::{Config, ConfigError, ConfigLoader, SourceKind};

use crate::args::{Cli, Commands};

/// Build the configuration for the command `cli` selects.
pub(crate) fn build_config(cli: &Cli) -> Result<Config, ConfigError> {
    let command = cli.resolved_command();
    let mut loader = ConfigLoader::new();

    // CLI overrides (highest priority); environment fills the rest.
    if let Some(ref list) = cli.sources {
        loader = loader.with_sources_list(list);
    }
    if let Some(timeout_secs) = cli.timeout {
        loader = loader.with_timeout(Duration::from_secs(timeout_secs));
    }
    if let Some(retries) = cli.max_retries {
        loader = loader.with_max_retries(retries);
    }
    if let Some(ref dir) = cli.cache_dir {
        loader = loader.with_cache_dir(dir.clone());
    }
    if cli.refresh {
        loader = loader.with_refresh(true);
    }
    if let Commands::Rank { top_n, metric } = &command {
        if let Some(n) = top_n {
            loader = loader.with_top_n(*n);
        }
        if let Some(name) = metric {
            loader = loader.with_metric(name.clone());
        }
    }

    let config = loader.from_env()?.build()?;

    if command == Commands::Compare {
        ensure_compare_sources(&config)?;
    }
    Ok(config)
}

/// `compare` pairs the gemini answer with search results and needs both.
pub(crate) fn ensure_compare_sources(config: &Config) -> Result<(), ConfigError> {
    let missing: Vec<&str> = [SourceKind::Gemini, SourceKind::Search]
        .into_iter()
        .filter(|kind| config.source(*kind).is_none())
        .map(SourceKind::as_str)
        .collect();

    if missing.is_empty() {
        return Ok(());
    }
    Err(ConfigError::InvalidValue {
        var: "TOP_SERVICES_SOURCES".to_string(),
        message: format!(
            "the compare command needs the gemini and search sources (missing: {})",
            missing.join(", ")
        ),
    })
}
