//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to the command handlers.
//! - Hand every command the shared cancellation token.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Configuration loading (see `main()` and `config_context`).

use anyhow::Result;
use top_services_config::Config;

use crate::args::{Cli, Commands};
use crate::cancellation::CancellationToken;
use crate::commands::{self, OutputOptions};

/// Run the command selected by `cli` against `config`.
pub(crate) async fn run_command(
    cli: Cli,
    config: Config,
    cancel_token: &CancellationToken,
) -> Result<()> {
    let output = OutputOptions {
        format: cli.output,
        file: cli.output_file.clone(),
    };

    match cli.resolved_command() {
        // Overrides for rank were folded into `config` when it was built.
        Commands::Rank { .. } => commands::rank::run(&config, &output, cancel_token).await,
        Commands::Compare => commands::compare::run(&config, &output, cancel_token).await,
    }
}
