//! In-memory storage backend.
//!
//! Keeps every table behind one async mutex and enforces the same
//! constraints as the Postgres schema: unique emails, foreign keys on
//! insert, RESTRICT on deleting referenced users and posts, and SET NULL
//! on deleting categories. Violations carry the same messages Postgres
//! would produce so both backends are indistinguishable over HTTP.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::{AppError, AppResult};
use crate::models::{
    Category, Comment, NewCategory, NewComment, NewPost, NewUser, Post, UpdatePost, User,
};
use crate::repositories::{CategoryStore, CommentStore, PostStore, UserStore};

const VARCHAR_LIMIT: usize = 255;

/// Table contents plus one id sequence per table.
///
/// Sequences never rewind, matching `SERIAL` columns after deletes.
#[derive(Default)]
struct Tables {
    users: BTreeMap<i32, User>,
    posts: BTreeMap<i32, Post>,
    categories: BTreeMap<i32, Category>,
    comments: BTreeMap<i32, Comment>,
    user_seq: i32,
    post_seq: i32,
    category_seq: i32,
    comment_seq: i32,
}

fn next_id(seq: &mut i32) -> i32 {
    *seq += 1;
    *seq
}

fn check_varchar(value: &str) -> AppResult<()> {
    if value.chars().count() > VARCHAR_LIMIT {
        return Err(AppError::Database {
            operation: "insert".to_string(),
            source: anyhow::anyhow!(
                "value too long for type character varying({})",
                VARCHAR_LIMIT
            ),
        });
    }
    Ok(())
}

fn missing_reference(entity: &str, field: &str, value: i32) -> AppError {
    AppError::ReferenceViolation {
        entity: entity.to_string(),
        field: field.to_string(),
        value: value.to_string(),
    }
}

fn restricted(parent: &str, constraint: &str, dependent: &str) -> AppError {
    AppError::RestrictViolation {
        entity: parent.to_string(),
        message: format!(
            "update or delete on table \"{}\" violates foreign key constraint \"{}\" on table \"{}\"",
            parent, constraint, dependent
        ),
    }
}

fn post_not_found(post_id: i32) -> AppError {
    AppError::NotFound {
        entity: "post".to_string(),
        field: "id".to_string(),
        value: post_id.to_string(),
    }
}

impl Tables {
    fn posts_of(&self, author_id: i32) -> Vec<Post> {
        self.posts
            .values()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect()
    }

    fn posts_in(&self, category_id: i32) -> Vec<Post> {
        self.posts
            .values()
            .filter(|p| p.category_id == Some(category_id))
            .cloned()
            .collect()
    }

    fn ensure_post_unreferenced(&self, post_ids: &[i32]) -> AppResult<()> {
        if self.comments.values().any(|c| post_ids.contains(&c.post_id)) {
            return Err(restricted("posts", "comments_post_id_fkey", "comments"));
        }
        Ok(())
    }
}

/// Process-local store implementing every storage trait.
///
/// Cloning shares the same tables.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        check_varchar(&new_user.email)?;
        if let Some(name) = &new_user.name {
            check_varchar(name)?;
        }

        let mut tables = self.tables.lock().await;
        if tables.users.values().any(|u| u.email == new_user.email) {
            return Err(AppError::Duplicate {
                entity: "users".to_string(),
                field: "email".to_string(),
                value: new_user.email,
                message: "duplicate key value violates unique constraint \"users_email_key\""
                    .to_string(),
            });
        }

        let user = User {
            id: next_id(&mut tables.user_seq),
            email: new_user.email,
            name: new_user.name,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_with_posts(&self, user_id: i32) -> AppResult<Option<(User, Vec<Post>)>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .users
            .get(&user_id)
            .map(|user| (user.clone(), tables.posts_of(user_id))))
    }

    async fn list_with_posts(&self) -> AppResult<Vec<(User, Vec<Post>)>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .users
            .values()
            .map(|user| (user.clone(), tables.posts_of(user.id)))
            .collect())
    }

    async fn delete_all(&self) -> AppResult<usize> {
        let mut tables = self.tables.lock().await;
        if !tables.posts.is_empty() {
            return Err(restricted("users", "posts_author_id_fkey", "posts"));
        }
        if !tables.comments.is_empty() {
            return Err(restricted("users", "comments_author_id_fkey", "comments"));
        }

        let deleted = tables.users.len();
        tables.users.clear();
        Ok(deleted)
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn create(&self, new_post: NewPost) -> AppResult<Post> {
        check_varchar(&new_post.title)?;

        let mut tables = self.tables.lock().await;
        if !tables.users.contains_key(&new_post.author_id) {
            return Err(missing_reference("posts", "author_id", new_post.author_id));
        }
        if let Some(category_id) = new_post.category_id {
            if !tables.categories.contains_key(&category_id) {
                return Err(missing_reference("posts", "category_id", category_id));
            }
        }

        let post = Post {
            id: next_id(&mut tables.post_seq),
            title: new_post.title,
            content: new_post.content,
            published: false,
            author_id: new_post.author_id,
            category_id: new_post.category_id,
        };
        tables.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn list_with_relations(&self) -> AppResult<Vec<(Post, User, Option<Category>)>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .posts
            .values()
            .filter_map(|post| {
                let author = tables.users.get(&post.author_id)?.clone();
                let category = post
                    .category_id
                    .and_then(|id| tables.categories.get(&id).cloned());
                Some((post.clone(), author, category))
            })
            .collect())
    }

    async fn update(&self, post_id: i32, changes: UpdatePost) -> AppResult<Post> {
        if let Some(title) = &changes.title {
            check_varchar(title)?;
        }

        let mut tables = self.tables.lock().await;
        let post = tables
            .posts
            .get_mut(&post_id)
            .ok_or_else(|| post_not_found(post_id))?;

        if let Some(title) = changes.title {
            post.title = title;
        }
        if let Some(content) = changes.content {
            post.content = Some(content);
        }
        if let Some(published) = changes.published {
            post.published = published;
        }
        Ok(post.clone())
    }

    async fn delete(&self, post_id: i32) -> AppResult<Post> {
        let mut tables = self.tables.lock().await;
        if !tables.posts.contains_key(&post_id) {
            return Err(post_not_found(post_id));
        }
        tables.ensure_post_unreferenced(&[post_id])?;

        tables
            .posts
            .remove(&post_id)
            .ok_or_else(|| post_not_found(post_id))
    }

    async fn delete_all(&self) -> AppResult<usize> {
        let mut tables = self.tables.lock().await;
        let ids: Vec<i32> = tables.posts.keys().copied().collect();
        tables.ensure_post_unreferenced(&ids)?;

        let deleted = tables.posts.len();
        tables.posts.clear();
        Ok(deleted)
    }
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn create(&self, new_category: NewCategory) -> AppResult<Category> {
        check_varchar(&new_category.name)?;

        let mut tables = self.tables.lock().await;
        let category = Category {
            id: next_id(&mut tables.category_seq),
            name: new_category.name,
        };
        tables.categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn list_with_posts(&self) -> AppResult<Vec<(Category, Vec<Post>)>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .categories
            .values()
            .map(|category| (category.clone(), tables.posts_in(category.id)))
            .collect())
    }

    async fn delete_all(&self) -> AppResult<usize> {
        let mut tables = self.tables.lock().await;
        for post in tables.posts.values_mut() {
            post.category_id = None;
        }

        let deleted = tables.categories.len();
        tables.categories.clear();
        Ok(deleted)
    }
}

#[async_trait]
impl CommentStore for MemoryStore {
    async fn create(&self, new_comment: NewComment) -> AppResult<(Comment, User, Post)> {
        let mut tables = self.tables.lock().await;
        let Some(post) = tables.posts.get(&new_comment.post_id).cloned() else {
            return Err(missing_reference("comments", "post_id", new_comment.post_id));
        };
        let Some(author) = tables.users.get(&new_comment.author_id).cloned() else {
            return Err(missing_reference(
                "comments",
                "author_id",
                new_comment.author_id,
            ));
        };

        let comment = Comment {
            id: next_id(&mut tables.comment_seq),
            content: new_comment.content,
            post_id: new_comment.post_id,
            author_id: new_comment.author_id,
        };
        tables.comments.insert(comment.id, comment.clone());
        Ok((comment, author, post))
    }

    async fn list_with_relations(&self) -> AppResult<Vec<(Comment, User, Post)>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .comments
            .values()
            .filter_map(|comment| {
                let author = tables.users.get(&comment.author_id)?.clone();
                let post = tables.posts.get(&comment.post_id)?.clone();
                Some((comment.clone(), author, post))
            })
            .collect())
    }

    async fn delete_all(&self) -> AppResult<usize> {
        let mut tables = self.tables.lock().await;
        let deleted = tables.comments.len();
        tables.comments.clear();
        Ok(deleted)
    }
}
