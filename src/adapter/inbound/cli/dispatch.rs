//! Routes a parsed command line to its handler.

use super::command::{Cli, Commands, ConfigCommand};
use super::{config, migrate, output, serve};
use crate::error::Result;

/// Configure output from the global flags, then run the command.
///
/// # Errors
/// Propagates the failing command's error.
pub async fn run(cli: Cli) -> Result<()> {
    output::configure(output::OutputConfig::new(cli.json, cli.quiet));

    match cli.command {
        Commands::Serve(args) => serve::execute(&args).await,
        Commands::Migrate(args) => migrate::execute(&args),
        Commands::Config(ConfigCommand::Init(args)) => config::execute_init(&args.path, args.force),
        Commands::Config(ConfigCommand::Show(args)) => config::execute_show(&args),
        Commands::Config(ConfigCommand::Validate(args)) => config::execute_validate(&args),
    }
}
