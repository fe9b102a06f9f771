//! Category service.

use std::sync::Arc;

use crate::error::AppResult;
use crate::models::{Category, NewCategory, Post};
use crate::repositories::CategoryStore;

#[derive(Clone)]
pub struct CategoryService {
    repo: Arc<dyn CategoryStore>,
}

impl CategoryService {
    pub fn new(repo: Arc<dyn CategoryStore>) -> Self {
        Self { repo }
    }

    pub async fn create_category(&self, new_category: NewCategory) -> AppResult<Category> {
        self.repo.create(new_category).await
    }

    pub async fn list_categories(&self) -> AppResult<Vec<(Category, Vec<Post>)>> {
        self.repo.list_with_posts().await
    }

    /// Deletes every category. Posts stay and lose their category.
    pub async fn delete_all_categories(&self) -> AppResult<usize> {
        let deleted = self.repo.delete_all().await?;
        tracing::info!(deleted, "Deleted all categories");
        Ok(deleted)
    }
}
