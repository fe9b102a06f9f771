//! Data Transfer Objects for API requests and responses.
//!
//! Field names follow the JSON contract (`authorId`, `categoryId`, ...),
//! and nested relations are embedded with `#[serde(flatten)]`.

mod category;
mod comment;
mod deleted;
mod error;
mod health;
mod post;
mod user;

pub use category::{CategoryResponse, CategoryWithPostsResponse, CreateCategoryRequest};
pub use comment::{CommentResponse, CommentWithRelationsResponse, CreateCommentRequest};
pub use deleted::DeletedResponse;
pub use error::ErrorResponse;
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use post::{CreatePostRequest, PostResponse, PostWithRelationsResponse, UpdatePostRequest};
pub use user::{CreateUserRequest, UserResponse, UserWithPostsResponse};
