//! `serve` subcommand.

use crate::config::{Settings, StorageBackend};
use crate::error::{AppError, AppResult};
use crate::server::Server;

pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Runs the server until shutdown, or only checks the configuration
    /// when `dry_run` is set.
    pub async fn execute(&self, dry_run: bool) -> AppResult<()> {
        if dry_run {
            return self.validate_only();
        }

        Server::new(self.config.clone())
            .run()
            .await
            .map_err(|source| AppError::Internal { source })
    }

    pub fn validate_only(&self) -> AppResult<()> {
        self.config.validate()?;

        println!("✓ Configuration is valid");
        println!("✓ Server would bind to: {}", self.config.server.address());
        println!("✓ Storage backend: {}", self.config.storage.backend);
        if self.config.storage.backend == StorageBackend::Postgres {
            println!(
                "✓ Database pool: {}..{} connections",
                self.config.database.min_connections, self.config.database.max_connections
            );
        }
        println!("Dry run completed successfully");
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_config() -> Settings {
        let mut config = Settings::default();
        config.storage.backend = StorageBackend::Memory;
        config
    }

    #[tokio::test]
    async fn test_dry_run_accepts_valid_config() {
        let handler = ServeCommandHandler::new(memory_config());
        assert!(handler.execute(true).await.is_ok());
    }

    #[tokio::test]
    async fn test_dry_run_rejects_invalid_config() {
        let mut config = memory_config();
        config.server.port = 0;
        let handler = ServeCommandHandler::new(config);

        let err = handler.execute(true).await.unwrap_err();
        assert!(matches!(err, AppError::Configuration { ref key, .. } if key == "server.port"));
    }
}
