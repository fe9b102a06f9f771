//! Category repository for async database operations.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppResult, DatabaseErrorConverter};
use crate::models::{Category, NewCategory, Post};
use crate::repositories::CategoryStore;
use crate::schema::{categories, posts};

#[derive(Clone)]
pub struct CategoryRepository {
    pool: AsyncDbPool,
}

impl CategoryRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryStore for CategoryRepository {
    async fn create(&self, new_category: NewCategory) -> AppResult<Category> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(categories::table)
            .values(&new_category)
            .returning(Category::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "insert category"))
    }

    async fn list_with_posts(&self) -> AppResult<Vec<(Category, Vec<Post>)>> {
        let mut conn = self.pool.get().await?;

        let all_categories = categories::table
            .select(Category::as_select())
            .order(categories::id.asc())
            .load(&mut conn)
            .await?;

        let all_posts = Post::belonging_to(&all_categories)
            .select(Post::as_select())
            .order(posts::id.asc())
            .load(&mut conn)
            .await?;

        Ok(all_posts
            .grouped_by(&all_categories)
            .into_iter()
            .zip(all_categories)
            .map(|(category_posts, category)| (category, category_posts))
            .collect())
    }

    async fn delete_all(&self) -> AppResult<usize> {
        let mut conn = self.pool.get().await?;

        // posts.category_id is ON DELETE SET NULL
        diesel::delete(categories::table)
            .execute(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "delete categories"))
    }
}
