//! Handler for the `migrate` command.

use crate::adapter::inbound::cli::command::MigrateArgs;
use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Execute the migrate command.
pub fn execute(args: &MigrateArgs) -> Result<()> {
    let path = args.config.resolve();
    let mut config = Config::load_or_default(path.as_deref())?;
    if let Some(database) = &args.database {
        config.database.url = database.clone();
    }
    config.validate()?;
    config.init_logging();

    output::section("Migrations");
    output::field("Database", &config.database.url);
    bootstrap::open_sqlite(&config.database)?;
    output::success("Schema is up to date");
    Ok(())
}
