//! Post service for business logic operations.

use std::sync::Arc;

use crate::error::AppResult;
use crate::models::{Category, NewPost, Post, UpdatePost, User};
use crate::repositories::PostStore;

/// Client message for a post that points at a missing user or category.
pub const INVALID_POST_REFERENCE: &str =
    "Invalid authorId or categoryId. Make sure the user and category exist first.";

#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostStore>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostStore>) -> Self {
        Self { repo }
    }

    /// Creates a post.
    ///
    /// # Errors
    /// `AppError::InvalidReference` when the author or category does not
    /// exist; any other storage failure is passed through.
    pub async fn create_post(&self, new_post: NewPost) -> AppResult<Post> {
        self.repo
            .create(new_post)
            .await
            .map_err(|e| e.with_reference_message(INVALID_POST_REFERENCE))
    }

    pub async fn list_posts(&self) -> AppResult<Vec<(Post, User, Option<Category>)>> {
        self.repo.list_with_relations().await
    }

    /// Applies a partial update. Fields left as `None` keep their value.
    pub async fn update_post(&self, id: i32, changes: UpdatePost) -> AppResult<Post> {
        self.repo.update(id, changes).await
    }

    pub async fn delete_post(&self, id: i32) -> AppResult<Post> {
        let post = self.repo.delete(id).await?;
        tracing::info!(post_id = post.id, "Deleted post");
        Ok(post)
    }

    pub async fn delete_all_posts(&self) -> AppResult<usize> {
        let deleted = self.repo.delete_all().await?;
        tracing::info!(deleted, "Deleted all posts");
        Ok(deleted)
    }
}
