//! Command dispatch logic.
//!
//! Responsibilities:
//! - Build the registry from the global options.
//! - Route parsed CLI arguments to the appropriate command handler.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Exit code mapping (see `error` module).

use anyhow::Result;

use crate::args::{Cli, Commands};
use crate::commands;

/// Dispatch CLI commands to their respective handlers.
pub(crate) fn run_command(cli: Cli) -> Result<()> {
    let registry = cli.registry();
    tracing::debug!(
        file = %registry.config_file().display(),
        prefix = ?registry.prefix(),
        "Registry configured"
    );

    match cli.command {
        Commands::Get { key } => commands::get::run(&registry, &key, cli.output),
        Commands::Lookup { key } => commands::lookup::run(&registry, &key, cli.output),
        Commands::Set { key, value } => commands::set::run(&registry, &key, value, cli.output),
        Commands::List => commands::list::run(&registry, cli.output),
    }
}
