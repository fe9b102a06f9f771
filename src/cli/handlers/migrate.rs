//! `migrate` subcommand.

use crate::config::error::ConfigError;
use crate::config::{Settings, StorageBackend};
use crate::db;
use crate::error::AppResult;

pub struct MigrateCommandHandler {
    config: Settings,
}

impl MigrateCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Applies pending migrations, lists them (`dry_run`) or reverts the
    /// last `rollback` of them.
    ///
    /// # Errors
    /// Fails when the storage backend is not Postgres, when the database
    /// settings are invalid, or when a migration step fails.
    pub async fn execute(&self, dry_run: bool, rollback: Option<u32>) -> AppResult<()> {
        if self.config.storage.backend != StorageBackend::Postgres {
            return Err(ConfigError::validation(
                "storage.backend",
                "Migrations require the postgres storage backend.",
            )
            .into());
        }
        self.config.database.validate()?;

        let url = &self.config.database.url;
        match (dry_run, rollback) {
            (true, _) => {
                let pending = db::pending_migrations(url).await?;
                if pending.is_empty() {
                    println!("✓ No pending migrations - database is up to date");
                } else {
                    println!("Found {} pending migration(s):", pending.len());
                    print_names(&pending);
                }
            }
            (false, Some(steps)) => {
                let reverted = db::revert_migrations(url, steps).await?;
                println!("✓ Rolled back {} migration(s):", reverted.len());
                print_names(&reverted);
            }
            (false, None) => {
                let applied = db::run_pending_migrations(url).await?;
                if applied.is_empty() {
                    println!("✓ No migrations to apply - database is up to date");
                } else {
                    println!("✓ Applied {} migration(s):", applied.len());
                    print_names(&applied);
                }
            }
        }

        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}

fn print_names(names: &[String]) {
    for name in names {
        println!("  - {}", name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[tokio::test]
    async fn test_memory_backend_is_rejected() {
        let mut config = Settings::default();
        config.storage.backend = StorageBackend::Memory;
        let handler = MigrateCommandHandler::new(config);

        let err = handler.execute(false, None).await.unwrap_err();
        assert!(matches!(err, AppError::Configuration { ref key, .. } if key == "storage.backend"));
    }

    #[tokio::test]
    async fn test_missing_database_url_is_rejected() {
        let handler = MigrateCommandHandler::new(Settings::default());
        assert_eq!(handler.config().database.url, "");

        let err = handler.execute(true, None).await.unwrap_err();
        assert!(matches!(err, AppError::Configuration { ref key, .. } if key == "database.url"));
    }
}
