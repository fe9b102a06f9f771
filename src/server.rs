//! HTTP server lifecycle: storage setup, binding and graceful shutdown.

use std::time::Duration;

use axum::http::StatusCode;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::timeout::TimeoutLayer;

use crate::api::create_router;
use crate::config::{ServerConfig, Settings, StorageBackend};
use crate::db::{establish_async_connection_pool, run_pending_migrations};
use crate::state::AppState;

pub struct Server {
    settings: Settings,
}

impl Server {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Builds the storage backend, binds the configured address and serves
    /// until Ctrl+C or SIGTERM.
    ///
    /// # Errors
    /// - Connection pool or migration failures (Postgres backend)
    /// - Address binding errors
    /// - Server runtime errors
    pub async fn run(self) -> anyhow::Result<()> {
        let settings = &self.settings;

        tracing::info!(
            app_name = %settings.application.name,
            app_version = %settings.application.version,
            environment = %settings.environment,
            "Application starting"
        );
        tracing::info!(
            host = %settings.server.host,
            port = settings.server.port,
            request_timeout = settings.server.request_timeout,
            "Server configuration loaded"
        );
        tracing::info!(
            level = %settings.logger.level,
            console_enabled = settings.logger.console.enabled,
            file_enabled = settings.logger.file.enabled,
            "Logger configuration loaded"
        );

        let state = self.build_state().await?;

        let router = create_router(state).layer(request_timeout_layer(&settings.server));

        let address = settings.server.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!(error = %e, address = %address, "Failed to bind to address");
            anyhow::anyhow!("Failed to bind to {}: {}", address, e)
        })?;

        tracing::info!(address = %address, "Server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    async fn build_state(&self) -> anyhow::Result<AppState> {
        let database = &self.settings.database;

        match self.settings.storage.backend {
            StorageBackend::Memory => {
                tracing::info!(backend = "memory", "Storage configured");
                Ok(AppState::in_memory())
            }
            StorageBackend::Postgres => {
                tracing::info!(
                    backend = "postgres",
                    max_connections = database.max_connections,
                    min_connections = database.min_connections,
                    connection_timeout = database.connection_timeout,
                    auto_migrate = database.auto_migrate,
                    "Storage configured"
                );

                if database.auto_migrate {
                    let applied = run_pending_migrations(&database.url).await?;
                    tracing::info!(count = applied.len(), migrations = ?applied, "Migrations applied");
                }

                let pool = establish_async_connection_pool(database).await?;
                tracing::info!("Database connection pool initialized");
                Ok(AppState::new(pool))
            }
        }
    }
}

/// Requests still running after `request_timeout` seconds are answered with 408.
fn request_timeout_layer(config: &ServerConfig) -> TimeoutLayer {
    TimeoutLayer::with_status_code(
        StatusCode::REQUEST_TIMEOUT,
        Duration::from_secs(config.request_timeout),
    )
}

/// Resolves on Ctrl+C or SIGTERM.
///
/// A signal handler that cannot be installed never fires; the other one
/// still does.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, routing::get};
    use tower::ServiceExt;

    fn timed_router() -> Router {
        let config = ServerConfig {
            request_timeout: 1,
            ..Default::default()
        };
        Router::new()
            .route("/fast", get(|| async { "done" }))
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "done"
                }),
            )
            .layer(request_timeout_layer(&config))
    }

    #[tokio::test]
    async fn test_slow_request_times_out_with_408() {
        let response = timed_router()
            .oneshot(Request::get("/slow").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn test_fast_request_is_not_affected() {
        let response = timed_router()
            .oneshot(Request::get("/fast").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
