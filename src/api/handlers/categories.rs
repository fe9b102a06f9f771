//! Category request handlers.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::CATEGORY_TAG;
use crate::api::dto::{
    CategoryResponse, CategoryWithPostsResponse, CreateCategoryRequest, DeletedResponse,
    ErrorResponse,
};
use crate::error::AppResult;
use crate::state::AppState;

pub fn category_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(
        list_categories,
        create_category,
        delete_all_categories
    ))
}

#[utoipa::path(
    get,
    path = "/categories",
    tag = CATEGORY_TAG,
    responses(
        (status = 200, description = "All categories with their posts", body = Vec<CategoryWithPostsResponse>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CategoryWithPostsResponse>>> {
    let categories = state.services.categories.list_categories().await?;
    Ok(Json(
        categories
            .into_iter()
            .map(CategoryWithPostsResponse::from)
            .collect(),
    ))
}

#[utoipa::path(
    post,
    path = "/categories",
    tag = CATEGORY_TAG,
    request_body = CreateCategoryRequest,
    responses(
        (status = 200, description = "Category created", body = CategoryResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn create_category(
    State(state): State<AppState>,
    payload: Result<Json<CreateCategoryRequest>, JsonRejection>,
) -> AppResult<Json<CategoryResponse>> {
    let Json(payload) = payload?;
    let category = state
        .services
        .categories
        .create_category(payload.into_new_category())
        .await?;
    Ok(Json(CategoryResponse::from(category)))
}

/// Posts in deleted categories are kept with `categoryId` set to null.
#[utoipa::path(
    delete,
    path = "/categories",
    tag = CATEGORY_TAG,
    responses(
        (status = 200, description = "Categories deleted", body = DeletedResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn delete_all_categories(
    State(state): State<AppState>,
) -> AppResult<Json<DeletedResponse>> {
    let deleted = state.services.categories.delete_all_categories().await?;
    Ok(Json(DeletedResponse::new(deleted, "categories")))
}
