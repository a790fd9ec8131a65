//! Handler for the `serve` command.

use crate::adapter::inbound::cli::command::ServeArgs;
use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::database::StorageBackend;
use crate::infrastructure::config::settings::Config;

/// Execute the serve command.
pub async fn execute(args: &ServeArgs) -> Result<()> {
    let path = args.config.resolve();
    let mut config = Config::load_or_default(path.as_deref())?;
    apply_args(&mut config, args);
    config.validate()?;
    config.init_logging();

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Listen", &config.server.bind);
    output::field("Storage", config.storage.backend);
    if config.storage.backend == StorageBackend::Sqlite {
        output::field("Database", &config.database.url);
    }
    if let Some(path) = &path {
        output::field("Config", path.display());
    }

    bootstrap::serve(config).await
}

fn apply_args(config: &mut Config, args: &ServeArgs) {
    if let Some(bind) = &args.bind {
        config.server.bind = bind.clone();
    }
    if let Some(database) = &args.database {
        config.database.url = database.clone();
        config.storage.backend = StorageBackend::Sqlite;
    }
    if args.memory {
        config.storage.backend = StorageBackend::Memory;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let mut config = Config::default();
        let args = ServeArgs {
            bind: Some("0.0.0.0:1234".to_string()),
            memory: true,
            ..Default::default()
        };
        apply_args(&mut config, &args);

        assert_eq!(config.server.bind, "0.0.0.0:1234");
        assert_eq!(config.storage.backend, StorageBackend::Memory);
    }

    #[test]
    fn database_flag_selects_sqlite() {
        let mut config = Config::default();
        config.storage.backend = StorageBackend::Memory;
        let args = ServeArgs {
            database: Some("shop.db".to_string()),
            ..Default::default()
        };
        apply_args(&mut config, &args);

        assert_eq!(config.database.url, "shop.db");
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
    }
}
