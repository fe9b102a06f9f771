//! Comment DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::dto::{PostResponse, UserResponse};
use crate::models::{Comment, NewComment, Post, User};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    #[schema(example = "Great post!")]
    pub content: String,
    pub post_id: i32,
    pub author_id: i32,
}

impl CreateCommentRequest {
    pub fn into_new_comment(self) -> NewComment {
        NewComment {
            content: self.content,
            post_id: self.post_id,
            author_id: self.author_id,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: i32,
    pub content: String,
    pub post_id: i32,
    pub author_id: i32,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            content: comment.content,
            post_id: comment.post_id,
            author_id: comment.author_id,
        }
    }
}

/// A comment with its author and post embedded.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CommentWithRelationsResponse {
    #[serde(flatten)]
    pub comment: CommentResponse,
    pub author: UserResponse,
    pub post: PostResponse,
}

impl From<(Comment, User, Post)> for CommentWithRelationsResponse {
    fn from((comment, author, post): (Comment, User, Post)) -> Self {
        Self {
            comment: CommentResponse::from(comment),
            author: UserResponse::from(author),
            post: PostResponse::from(post),
        }
    }
}
