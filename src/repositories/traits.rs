//! Storage traits shared by the Postgres and in-memory backends.
//!
//! Implementations report constraint failures through [`AppError`]
//! variants so callers never inspect vendor error codes:
//! - missing parent on insert: `ReferenceViolation`
//! - delete blocked by dependents: `RestrictViolation`
//! - duplicate unique value: `Duplicate`
//! - update/delete of an absent row: `NotFound`

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{
    Category, Comment, NewCategory, NewComment, NewPost, NewUser, Post, UpdatePost, User,
};

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, new_user: NewUser) -> AppResult<User>;

    /// A user and their posts, or `None` if the id is unknown.
    async fn find_with_posts(&self, user_id: i32) -> AppResult<Option<(User, Vec<Post>)>>;

    async fn list_with_posts(&self) -> AppResult<Vec<(User, Vec<Post>)>>;

    /// Deletes every user and returns the number removed.
    async fn delete_all(&self) -> AppResult<usize>;
}

#[async_trait]
pub trait PostStore: Send + Sync {
    async fn create(&self, new_post: NewPost) -> AppResult<Post>;

    /// Every post with its author and optional category.
    async fn list_with_relations(&self) -> AppResult<Vec<(Post, User, Option<Category>)>>;

    /// Applies the supplied fields. An empty changeset returns the row as is.
    async fn update(&self, post_id: i32, changes: UpdatePost) -> AppResult<Post>;

    /// Deletes one post and returns it.
    async fn delete(&self, post_id: i32) -> AppResult<Post>;

    async fn delete_all(&self) -> AppResult<usize>;
}

#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn create(&self, new_category: NewCategory) -> AppResult<Category>;

    async fn list_with_posts(&self) -> AppResult<Vec<(Category, Vec<Post>)>>;

    /// Deletes every category; posts keep existing with no category.
    async fn delete_all(&self) -> AppResult<usize>;
}

#[async_trait]
pub trait CommentStore: Send + Sync {
    /// Inserts a comment and returns it with its author and post.
    async fn create(&self, new_comment: NewComment) -> AppResult<(Comment, User, Post)>;

    async fn list_with_relations(&self) -> AppResult<Vec<(Comment, User, Post)>>;

    async fn delete_all(&self) -> AppResult<usize>;
}
