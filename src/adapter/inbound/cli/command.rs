//! Command-line interface definitions.
//!
//! Defines the CLI structure for the inventory service using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::paths;

/// Product and category inventory service
#[derive(Parser, Debug)]
#[command(name = "inventory")]
#[command(version)]
pub struct Cli {
    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server (foreground)
    Serve(ServeArgs),

    /// Apply pending database migrations and exit
    Migrate(MigrateArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `inventory config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Generate a new configuration file from template.
    Init(ConfigInitArgs),
    /// Display the effective configuration with defaults applied.
    Show(ConfigPathArg),
    /// Validate a configuration file for correctness.
    Validate(ConfigPathArg),
}

/// Optional `--config` flag shared by most commands.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigPathArg {
    /// Path to the configuration file [default: ./config.toml if present]
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl ConfigPathArg {
    /// The file to load, if any.
    #[must_use]
    pub fn resolve(&self) -> Option<PathBuf> {
        paths::resolve_config(self.config.as_deref())
    }
}

/// Arguments for `inventory serve`.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    #[command(flatten)]
    pub config: ConfigPathArg,

    /// Listen address, overriding `[server] bind`
    #[arg(short, long)]
    pub bind: Option<String>,

    /// SQLite database path, overriding `[database] url`
    #[arg(short, long, conflicts_with = "memory")]
    pub database: Option<String>,

    /// Serve from the in-memory store
    #[arg(long)]
    pub memory: bool,
}

/// Arguments for `inventory migrate`.
#[derive(Args, Debug, Default)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub config: ConfigPathArg,

    /// SQLite database path, overriding `[database] url`
    #[arg(short, long)]
    pub database: Option<String>,
}

/// Arguments for `inventory config init`.
#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output path for the generated configuration file.
    #[arg(default_value = paths::DEFAULT_CONFIG)]
    pub path: PathBuf,
    /// Overwrite the file if it already exists.
    #[arg(long)]
    pub force: bool,
}
