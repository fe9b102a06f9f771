//! User-related DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::dto::PostResponse;
use crate::models::{NewUser, Post, User};

// ============================================================================
// Request DTOs
// ============================================================================

/// Request body for creating a new user.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    #[schema(format = "email", example = "alice@example.com")]
    pub email: String,
    #[schema(example = "Alice")]
    pub name: Option<String>,
}

impl CreateUserRequest {
    pub fn into_new_user(self) -> NewUser {
        NewUser {
            email: self.email,
            name: self.name,
        }
    }
}

// ============================================================================
// Response DTOs
// ============================================================================

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub name: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
        }
    }
}

/// A user with their posts embedded.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserWithPostsResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub posts: Vec<PostResponse>,
}

impl From<(User, Vec<Post>)> for UserWithPostsResponse {
    fn from((user, posts): (User, Vec<Post>)) -> Self {
        Self {
            user: UserResponse::from(user),
            posts: posts.into_iter().map(PostResponse::from).collect(),
        }
    }
}
