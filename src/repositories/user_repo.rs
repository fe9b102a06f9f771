//! User repository for async database operations.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult, DatabaseErrorConverter};
use crate::models::{NewUser, Post, User};
use crate::repositories::UserStore;
use crate::schema::{posts, users};

/// User repository holding an async connection pool.
///
/// Since `AsyncDbPool` (bb8::Pool) internally uses `Arc`, cloning is cheap.
#[derive(Clone)]
pub struct UserRepository {
    pool: AsyncDbPool,
}

impl UserRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(users::table)
            .values(&new_user)
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "insert user"))
    }

    async fn find_with_posts(&self, user_id: i32) -> AppResult<Option<(User, Vec<Post>)>> {
        let mut conn = self.pool.get().await?;

        let user = users::table
            .find(user_id)
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)?;

        let Some(user) = user else {
            return Ok(None);
        };

        let user_posts = Post::belonging_to(&user)
            .select(Post::as_select())
            .order(posts::id.asc())
            .load(&mut conn)
            .await?;

        Ok(Some((user, user_posts)))
    }

    async fn list_with_posts(&self) -> AppResult<Vec<(User, Vec<Post>)>> {
        let mut conn = self.pool.get().await?;

        let all_users = users::table
            .select(User::as_select())
            .order(users::id.asc())
            .load(&mut conn)
            .await?;

        let all_posts = Post::belonging_to(&all_users)
            .select(Post::as_select())
            .order(posts::id.asc())
            .load(&mut conn)
            .await?;

        Ok(all_posts
            .grouped_by(&all_users)
            .into_iter()
            .zip(all_users)
            .map(|(user_posts, user)| (user, user_posts))
            .collect())
    }

    async fn delete_all(&self) -> AppResult<usize> {
        let mut conn = self.pool.get().await?;

        diesel::delete(users::table)
            .execute(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "delete users"))
    }
}
