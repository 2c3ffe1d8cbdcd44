//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse command-line arguments and the environment defaults clap reads.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not read `TOP_SERVICES_*` pipeline settings; the config loader owns
//!   those and CLI flags only override them (see `config_context` module).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::formatters::OutputFormat;
use crate::logging::LogFormat;

#[derive(Parser)]
#[command(name = "top-services")]
#[command(
    about = "Rank the top services reported by generative recall, web search and JSON sources",
    long_about = None
)]
#[command(version)]
#[command(
    after_help = "Examples:\n  top-services\n  top-services rank --top-n 5 -o csv\n  top-services --sources file rank --metric usage\n  top-services --sources gemini,search --refresh compare\n  top-services --sources verify rank --metric accuracy\n  top-services -o json --output-file report.json\n"
)]
pub struct Cli {
    /// Comma-separated data sources to query (gemini, search, http, file, verify)
    #[arg(long, global = true, value_name = "LIST")]
    pub sources: Option<String>,

    /// Per-source fetch timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Maximum number of retries for transient HTTP failures
    #[arg(long, global = true)]
    pub max_retries: Option<usize>,

    /// Ignore cached search results and fetch them again
    #[arg(long, global = true)]
    pub refresh: bool,

    /// Directory holding the search result cache
    #[arg(long, global = true, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Output format
    #[arg(
        short,
        long,
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        env = "TOP_SERVICES_OUTPUT"
    )]
    pub output: OutputFormat,

    /// Output file path (saves results to file instead of stdout)
    #[arg(long, global = true, value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Log line format on stderr (filter with RUST_LOG)
    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = LogFormat::Text,
        env = "TOP_SERVICES_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// The subcommand to run; a bare invocation ranks with configured defaults.
    pub fn resolved_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Rank {
            top_n: None,
            metric: None,
        })
    }
}

#[derive(Subcommand, Clone, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Fetch all sources and print the top N services (default)
    Rank {
        /// Number of services to report
        #[arg(short = 'n', long, value_name = "N")]
        top_n: Option<usize>,

        /// Metric to rank by (e.g. score, usage)
        #[arg(short, long, value_name = "NAME")]
        metric: Option<String>,
    },

    /// Compare generative recall against web search results
    Compare,
}
