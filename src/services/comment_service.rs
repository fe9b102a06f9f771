//! Comment service.

use std::sync::Arc;

use crate::error::AppResult;
use crate::models::{Comment, NewComment, Post, User};
use crate::repositories::CommentStore;

/// Client message for a comment that points at a missing post or user.
pub const INVALID_COMMENT_REFERENCE: &str =
    "Invalid postId or authorId. Make sure the post and user exist first.";

#[derive(Clone)]
pub struct CommentService {
    repo: Arc<dyn CommentStore>,
}

impl CommentService {
    pub fn new(repo: Arc<dyn CommentStore>) -> Self {
        Self { repo }
    }

    /// Creates a comment and returns it with its author and post.
    ///
    /// # Errors
    /// `AppError::InvalidReference` when the post or author does not exist.
    pub async fn create_comment(&self, new_comment: NewComment) -> AppResult<(Comment, User, Post)> {
        self.repo
            .create(new_comment)
            .await
            .map_err(|e| e.with_reference_message(INVALID_COMMENT_REFERENCE))
    }

    pub async fn list_comments(&self) -> AppResult<Vec<(Comment, User, Post)>> {
        self.repo.list_with_relations().await
    }

    pub async fn delete_all_comments(&self) -> AppResult<usize> {
        let deleted = self.repo.delete_all().await?;
        tracing::info!(deleted, "Deleted all comments");
        Ok(deleted)
    }
}
