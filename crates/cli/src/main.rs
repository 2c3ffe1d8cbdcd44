//! top-services - rank the leading services of a category across sources.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Build the immutable configuration and the services client.
//! - Format and write the report in the requested output format.
//!
//! Does NOT handle:
//! - Fetching, merging or ranking (see `crates/client`).
//! - Parsing configuration keys (see `crates/config`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing to allow `.env` to provide clap defaults.
//! - Configuration errors exit with code 2 before any network activity.
//! - Nothing is written to stdout or the output file on a failed run.

mod args;
mod cancellation;
mod commands;
mod config_context;
mod dispatch;
mod error;
mod formatters;
mod logging;

use args::Cli;
use cancellation::{CancellationToken, is_cancelled_error, print_cancelled_message};
use clap::Parser;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use top_services_config::ConfigLoader;

#[tokio::main]
async fn main() {
    // Load .env file BEFORE CLI parsing so clap env defaults can read .env values
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::ConfigError.as_i32());
    }

    let cli = Cli::parse();
    logging::init(cli.log_format);

    let config = match config_context::build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to build configuration: {}", e);
            std::process::exit(ExitCode::from(&e).as_i32());
        }
    };
    tracing::debug!(sources = ?config.source_names(), "Configuration loaded");

    // Create cancellation token and set up signal handling
    let cancel = CancellationToken::new();
    let cancel_clone = cancel.clone();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        cancel_clone.cancel();
    });

    let exit_code = match run_command(cli, config, &cancel).await {
        Ok(()) => ExitCode::Success,
        Err(e) if is_cancelled_error(&e) => {
            print_cancelled_message();
            ExitCode::Interrupted
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}
