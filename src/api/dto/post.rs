//! Post-related DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::dto::{CategoryResponse, UserResponse};
use crate::models::{Category, NewPost, Post, UpdatePost, User};

// ============================================================================
// Request DTOs
// ============================================================================

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[schema(example = "Hello world")]
    pub title: String,
    pub content: Option<String>,
    #[schema(example = 1)]
    pub author_id: i32,
    pub category_id: Option<i32>,
}

impl CreatePostRequest {
    pub fn into_new_post(self) -> NewPost {
        NewPost {
            title: self.title,
            content: self.content,
            author_id: self.author_id,
            category_id: self.category_id,
        }
    }
}

/// Partial update; omitted fields keep their stored value.
#[derive(Debug, Deserialize, ToSchema, Default)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    #[schema(example = true)]
    pub published: Option<bool>,
}

impl UpdatePostRequest {
    pub fn into_update_post(self) -> UpdatePost {
        UpdatePost {
            title: self.title,
            content: self.content,
            published: self.published,
        }
    }
}

// ============================================================================
// Response DTOs
// ============================================================================

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: i32,
    pub title: String,
    pub content: Option<String>,
    pub published: bool,
    pub author_id: i32,
    pub category_id: Option<i32>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            published: post.published,
            author_id: post.author_id,
            category_id: post.category_id,
        }
    }
}

/// A post with its author and category embedded.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PostWithRelationsResponse {
    #[serde(flatten)]
    pub post: PostResponse,
    pub author: UserResponse,
    pub category: Option<CategoryResponse>,
}

impl From<(Post, User, Option<Category>)> for PostWithRelationsResponse {
    fn from((post, author, category): (Post, User, Option<Category>)) -> Self {
        Self {
            post: PostResponse::from(post),
            author: UserResponse::from(author),
            category: category.map(CategoryResponse::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_response_uses_camel_case() {
        let response = PostResponse {
            id: 1,
            title: "t".to_string(),
            content: None,
            published: false,
            author_id: 2,
            category_id: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["authorId"], 2);
        assert!(json["categoryId"].is_null());
    }

    #[test]
    fn test_create_post_request_reads_camel_case() {
        let request: CreatePostRequest = serde_json::from_str(
            r#"{"title":"t","content":"c","authorId":3,"categoryId":4}"#,
        )
        .unwrap();
        assert_eq!(request.author_id, 3);
        assert_eq!(request.category_id, Some(4));
    }

    #[test]
    fn test_update_request_with_only_published() {
        let request: UpdatePostRequest = serde_json::from_str(r#"{"published":true}"#).unwrap();
        let update = request.into_update_post();
        assert_eq!(update.published, Some(true));
        assert!(update.title.is_none());
        assert!(update.content.is_none());
    }
}
