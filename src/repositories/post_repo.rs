//! Post repository for async database operations.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult, DatabaseErrorConverter};
use crate::models::{Category, NewPost, Post, UpdatePost, User};
use crate::repositories::PostStore;
use crate::schema::{categories, posts, users};

#[derive(Clone)]
pub struct PostRepository {
    pool: AsyncDbPool,
}

impl PostRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

fn post_not_found(post_id: i32) -> AppError {
    AppError::NotFound {
        entity: "post".to_string(),
        field: "id".to_string(),
        value: post_id.to_string(),
    }
}

#[async_trait]
impl PostStore for PostRepository {
    async fn create(&self, new_post: NewPost) -> AppResult<Post> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(posts::table)
            .values(&new_post)
            .returning(Post::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "insert post"))
    }

    async fn list_with_relations(&self) -> AppResult<Vec<(Post, User, Option<Category>)>> {
        let mut conn = self.pool.get().await?;

        posts::table
            .inner_join(users::table)
            .left_join(categories::table)
            .select((
                Post::as_select(),
                User::as_select(),
                Option::<Category>::as_select(),
            ))
            .order(posts::id.asc())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn update(&self, post_id: i32, changes: UpdatePost) -> AppResult<Post> {
        let mut conn = self.pool.get().await?;

        let result = if changes.is_empty() {
            posts::table
                .find(post_id)
                .select(Post::as_select())
                .first(&mut conn)
                .await
        } else {
            diesel::update(posts::table.find(post_id))
                .set(&changes)
                .returning(Post::as_returning())
                .get_result(&mut conn)
                .await
        };

        result.map_err(|e| match e {
            diesel::result::Error::NotFound => post_not_found(post_id),
            other => DatabaseErrorConverter::convert_diesel_error(other, "update post"),
        })
    }

    async fn delete(&self, post_id: i32) -> AppResult<Post> {
        let mut conn = self.pool.get().await?;

        diesel::delete(posts::table.find(post_id))
            .returning(Post::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| match e {
                diesel::result::Error::NotFound => post_not_found(post_id),
                other => DatabaseErrorConverter::convert_diesel_error(other, "delete post"),
            })
    }

    async fn delete_all(&self) -> AppResult<usize> {
        let mut conn = self.pool.get().await?;

        diesel::delete(posts::table)
            .execute(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "delete posts"))
    }
}
