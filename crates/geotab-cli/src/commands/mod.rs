//! Command implementations

mod config;
mod nearest;
mod save;
mod summary;

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;
use anyhow::Result;

/// Execute a CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Nearest(args) => nearest::execute(args, config_path, &output),
        Commands::Summary(args) => summary::execute(args, &output),
        Commands::Save(args) => save::execute(args, config_path, &output),
        Commands::Config => config::execute(config_path, &output),
    }
}
