//! Repository layer for data access operations.
//!
//! Each entity has a storage trait with a Postgres repository and a shared
//! in-memory implementation behind it.

mod category_repo;
mod comment_repo;
mod memory;
mod post_repo;
mod traits;
mod user_repo;

pub use category_repo::CategoryRepository;
pub use comment_repo::CommentRepository;
pub use memory::MemoryStore;
pub use post_repo::PostRepository;
pub use traits::{CategoryStore, CommentStore, PostStore, UserStore};
pub use user_repo::UserRepository;

use std::sync::Arc;

use crate::db::AsyncDbPool;

/// Aggregates all repositories for convenient access.
///
/// Every field is an `Arc`, so cloning is cheap.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserStore>,
    pub posts: Arc<dyn PostStore>,
    pub categories: Arc<dyn CategoryStore>,
    pub comments: Arc<dyn CommentStore>,
}

impl Repositories {
    /// Postgres-backed repositories sharing one connection pool.
    pub fn postgres(pool: AsyncDbPool) -> Self {
        Self {
            users: Arc::new(UserRepository::new(pool.clone())),
            posts: Arc::new(PostRepository::new(pool.clone())),
            categories: Arc::new(CategoryRepository::new(pool.clone())),
            comments: Arc::new(CommentRepository::new(pool)),
        }
    }

    /// Repositories backed by one fresh [`MemoryStore`].
    pub fn in_memory() -> Self {
        let store = MemoryStore::new();
        Self {
            users: Arc::new(store.clone()),
            posts: Arc::new(store.clone()),
            categories: Arc::new(store.clone()),
            comments: Arc::new(store),
        }
    }
}
