//! Category DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::dto::PostResponse;
use crate::models::{Category, NewCategory, Post};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    #[schema(example = "Rust")]
    pub name: String,
}

impl CreateCategoryRequest {
    pub fn into_new_category(self) -> NewCategory {
        NewCategory { name: self.name }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryWithPostsResponse {
    #[serde(flatten)]
    pub category: CategoryResponse,
    pub posts: Vec<PostResponse>,
}

impl From<(Category, Vec<Post>)> for CategoryWithPostsResponse {
    fn from((category, posts): (Category, Vec<Post>)) -> Self {
        Self {
            category: CategoryResponse::from(category),
            posts: posts.into_iter().map(PostResponse::from).collect(),
        }
    }
}
