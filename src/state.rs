//! Application state for Axum web framework.

use crate::db::AsyncDbPool;
use crate::repositories::Repositories;
use crate::services::Services;

/// Application state shared by all handlers.
///
/// Cloning is cheap since both Services and AsyncDbPool use Arc internally.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    /// Present only for the Postgres backend; used by health checks.
    pub db_pool: Option<AsyncDbPool>,
}

impl AppState {
    /// State backed by Postgres repositories sharing `pool`.
    ///
    /// # Example
    /// ```ignore
    /// let pool = establish_async_connection_pool(&settings.database).await?;
    /// let state = AppState::new(pool);
    /// ```
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            services: Services::new(Repositories::postgres(pool.clone())),
            db_pool: Some(pool),
        }
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self {
            services: Services::new(Repositories::in_memory()),
            db_pool: None,
        }
    }
}
