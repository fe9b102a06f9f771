//! Embedded schema migrations.
//!
//! diesel's migration harness needs a synchronous connection, so every
//! helper opens a `PgConnection` on the blocking thread pool.

use diesel::Connection;
use diesel::migration::Migration;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::error::{AppError, AppResult};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Names of migrations that have not been applied yet.
pub async fn pending_migrations(database_url: &str) -> AppResult<Vec<String>> {
    with_connection(database_url, |conn| {
        let pending = conn
            .pending_migrations(MIGRATIONS)
            .map_err(|e| migration_error("check pending migrations", e))?;
        Ok(pending.iter().map(|m| m.name().to_string()).collect())
    })
    .await
}

/// Applies all pending migrations and returns their versions.
pub async fn run_pending_migrations(database_url: &str) -> AppResult<Vec<String>> {
    with_connection(database_url, |conn| {
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| migration_error("run pending migrations", e))?;
        Ok(applied.iter().map(|v| v.to_string()).collect())
    })
    .await
}

/// Reverts up to `steps` of the most recently applied migrations.
///
/// Stops early once nothing is left to revert.
pub async fn revert_migrations(database_url: &str, steps: u32) -> AppResult<Vec<String>> {
    with_connection(database_url, move |conn| {
        let mut reverted = Vec::new();
        for _ in 0..steps {
            let applied = conn
                .applied_migrations()
                .map_err(|e| migration_error("list applied migrations", e))?;
            if applied.is_empty() {
                break;
            }
            let version = conn
                .revert_last_migration(MIGRATIONS)
                .map_err(|e| migration_error("revert migration", e))?;
            reverted.push(version.to_string());
        }
        Ok(reverted)
    })
    .await
}

async fn with_connection<T, F>(database_url: &str, f: F) -> AppResult<T>
where
    T: Send + 'static,
    F: FnOnce(&mut PgConnection) -> AppResult<T> + Send + 'static,
{
    let database_url = database_url.to_string();
    tokio::task::spawn_blocking(move || {
        let mut conn =
            PgConnection::establish(&database_url).map_err(|e| AppError::Database {
                operation: "establish connection for migrations".to_string(),
                source: anyhow::Error::from(e),
            })?;
        f(&mut conn)
    })
    .await
    .map_err(|e| AppError::Internal {
        source: anyhow::Error::from(e),
    })?
}

fn migration_error(
    operation: &str,
    error: Box<dyn std::error::Error + Send + Sync>,
) -> AppError {
    AppError::Database {
        operation: operation.to_string(),
        source: anyhow::anyhow!("Migration error: {}", error),
    }
}
