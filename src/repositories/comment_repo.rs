//! Comment repository for async database operations.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult, DatabaseErrorConverter};
use crate::models::{Comment, NewComment, Post, User};
use crate::repositories::CommentStore;
use crate::schema::{comments, posts, users};

#[derive(Clone)]
pub struct CommentRepository {
    pool: AsyncDbPool,
}

impl CommentRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentStore for CommentRepository {
    async fn create(&self, new_comment: NewComment) -> AppResult<(Comment, User, Post)> {
        let mut conn = self.pool.get().await?;

        let comment = diesel::insert_into(comments::table)
            .values(&new_comment)
            .returning(Comment::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "insert comment"))?;

        comments::table
            .inner_join(users::table)
            .inner_join(posts::table)
            .filter(comments::id.eq(comment.id))
            .select((Comment::as_select(), User::as_select(), Post::as_select()))
            .first(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn list_with_relations(&self) -> AppResult<Vec<(Comment, User, Post)>> {
        let mut conn = self.pool.get().await?;

        comments::table
            .inner_join(users::table)
            .inner_join(posts::table)
            .select((Comment::as_select(), User::as_select(), Post::as_select()))
            .order(comments::id.asc())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn delete_all(&self) -> AppResult<usize> {
        let mut conn = self.pool.get().await?;

        diesel::delete(comments::table)
            .execute(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "delete comments"))
    }
}
