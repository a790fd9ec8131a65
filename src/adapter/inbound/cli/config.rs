//! Handler for the `config` command group.

use std::fs;
use std::path::Path;

use crate::adapter::inbound::cli::command::ConfigPathArg;
use crate::adapter::inbound::cli::output;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::database::StorageBackend;
use crate::infrastructure::config::settings::Config;

/// Default config template with documentation.
const CONFIG_TEMPLATE: &str = include_str!("../../../../config.toml.example");

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, CONFIG_TEMPLATE)?;
    output::section("Config Initialized");
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::section("Next Steps");
    output::note(&format!("1. Edit {} with your settings", path.display()));
    output::note(&format!(
        "2. Run: inventory config validate -c {}",
        path.display()
    ));
    output::note(&format!("3. Run: inventory serve -c {}", path.display()));
    Ok(())
}

/// Execute `config show`.
pub fn execute_show(args: &ConfigPathArg) -> Result<()> {
    let path = args.resolve();
    let config = Config::load_or_default(path.as_deref())?;

    output::section("Effective Configuration");
    match &path {
        Some(path) => output::field("Source", path.display()),
        None => output::field("Source", "(defaults)"),
    }

    output::section("Server");
    output::field("Bind", &config.server.bind);

    output::section("Storage");
    output::field("Backend", config.storage.backend);
    if config.storage.backend == StorageBackend::Sqlite {
        output::field("Database", &config.database.url);
        output::field("Max connections", config.database.max_connections);
        output::field(
            "Busy timeout",
            format!("{}ms", config.database.busy_timeout_ms),
        );
    }

    output::section("Pagination");
    output::field("Default size", config.pagination.default_size);
    output::field("Max size", config.pagination.max_size);

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);

    if !output::is_json() {
        output::section("TOML");
        output::lines(&config.to_toml()?);
    }
    Ok(())
}

/// Execute `config validate`.
pub fn execute_validate(args: &ConfigPathArg) -> Result<()> {
    output::section("Config Validation");
    let Some(path) = args.resolve() else {
        output::warning("No config file found; defaults apply");
        Config::load_or_default(None)?;
        output::success("Default configuration is valid");
        return Ok(());
    };

    output::field("Path", path.display());
    let config = Config::load(&path)?;
    output::success("Config file is valid");

    if config.storage.backend == StorageBackend::Memory {
        output::warning("In-memory storage is selected; data is lost on exit");
    }
    output::field(
        "Next",
        format!("inventory serve -c {}", path.display()),
    );
    Ok(())
}
