//! User service for business logic operations.

use std::sync::Arc;

use crate::error::AppResult;
use crate::models::{NewUser, Post, User};
use crate::repositories::UserStore;

/// User service wrapping the configured [`UserStore`].
///
/// Cloning is cheap; the store is shared through an `Arc`.
#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserStore>) -> Self {
        Self { repo }
    }

    /// Creates a new user.
    ///
    /// A duplicate email surfaces as `AppError::Duplicate`.
    pub async fn create_user(&self, new_user: NewUser) -> AppResult<User> {
        self.repo.create(new_user).await
    }

    /// Gets a user and their posts.
    ///
    /// # Returns
    /// `None` if no user has this id
    pub async fn get_user(&self, id: i32) -> AppResult<Option<(User, Vec<Post>)>> {
        self.repo.find_with_posts(id).await
    }

    pub async fn list_users(&self) -> AppResult<Vec<(User, Vec<Post>)>> {
        self.repo.list_with_posts().await
    }

    /// Deletes every user and returns how many were removed.
    pub async fn delete_all_users(&self) -> AppResult<usize> {
        let deleted = self.repo.delete_all().await?;
        tracing::info!(deleted, "Deleted all users");
        Ok(deleted)
    }
}
