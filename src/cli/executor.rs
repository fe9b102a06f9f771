//! Dispatches a parsed command line to its handler.

use super::handlers::{MigrateCommandHandler, ServeCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::Settings;
use crate::config::error::ConfigError;
use crate::error::AppResult;

/// Runs the selected subcommand; no subcommand means `serve`.
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<()> {
    cli.validate()
        .map_err(|msg| ConfigError::validation("cli_arguments".to_string(), msg))?;

    match &cli.command {
        Some(Commands::Serve { dry_run, .. }) => {
            ServeCommandHandler::new(settings).execute(*dry_run).await
        }
        None => ServeCommandHandler::new(settings).execute(false).await,
        Some(Commands::Migrate { dry_run, rollback }) => {
            if let Some(steps) = rollback {
                tracing::warn!(steps, "Reverting migrations");
            }
            MigrateCommandHandler::new(settings)
                .execute(*dry_run, *rollback)
                .await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageBackend;
    use crate::error::AppError;
    use clap::Parser;

    fn memory_config() -> Settings {
        let mut config = Settings::default();
        config.storage.backend = StorageBackend::Memory;
        config
    }

    #[tokio::test]
    async fn test_execute_serve_dry_run() {
        let cli = Cli::try_parse_from(["blog-api", "serve", "--dry-run"]).unwrap();
        assert!(execute_command(&cli, memory_config()).await.is_ok());
    }

    #[tokio::test]
    async fn test_execute_rejects_conflicting_migrate_flags() {
        let cli = Cli {
            command: Some(Commands::Migrate {
                dry_run: true,
                rollback: Some(5),
            }),
            config: None,
            env: None,
            verbose: false,
            quiet: false,
        };

        let err = execute_command(&cli, memory_config()).await.unwrap_err();
        assert!(matches!(err, AppError::Configuration { ref key, .. } if key == "cli_arguments"));
    }
}
