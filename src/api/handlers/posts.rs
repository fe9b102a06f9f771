//! Post request handlers.

use axum::{
    Json,
    extract::{Path, State, rejection::{JsonRejection, PathRejection}},
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::POST_TAG;
use crate::api::dto::{
    CreatePostRequest, DeletedResponse, ErrorResponse, PostResponse, PostWithRelationsResponse,
    UpdatePostRequest,
};
use crate::error::AppResult;
use crate::state::AppState;

/// Routes:
/// - GET /posts          - List posts with author and category
/// - POST /posts         - Create a post
/// - DELETE /posts       - Delete all posts
/// - PUT /posts/{id}     - Update a post
/// - DELETE /posts/{id}  - Delete a post
pub fn post_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_posts, create_post, delete_all_posts))
        .routes(routes!(update_post, delete_post))
}

#[utoipa::path(
    get,
    path = "/posts",
    tag = POST_TAG,
    responses(
        (status = 200, description = "All posts with author and category", body = Vec<PostWithRelationsResponse>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn list_posts(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<PostWithRelationsResponse>>> {
    let posts = state.services.posts.list_posts().await?;
    Ok(Json(
        posts
            .into_iter()
            .map(PostWithRelationsResponse::from)
            .collect(),
    ))
}

#[utoipa::path(
    post,
    path = "/posts",
    tag = POST_TAG,
    request_body = CreatePostRequest,
    responses(
        (status = 200, description = "Post created", body = PostResponse),
        (status = 400, description = "Author or category does not exist", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn create_post(
    State(state): State<AppState>,
    payload: Result<Json<CreatePostRequest>, JsonRejection>,
) -> AppResult<Json<PostResponse>> {
    let Json(payload) = payload?;
    let post = state
        .services
        .posts
        .create_post(payload.into_new_post())
        .await?;
    Ok(Json(PostResponse::from(post)))
}

#[utoipa::path(
    put,
    path = "/posts/{id}",
    tag = POST_TAG,
    params(
        ("id" = i32, Path, description = "Post ID")
    ),
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Post updated", body = PostResponse),
        (status = 500, description = "Unknown post or storage failure", body = ErrorResponse)
    )
)]
async fn update_post(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdatePostRequest>, JsonRejection>,
) -> AppResult<Json<PostResponse>> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let post = state
        .services
        .posts
        .update_post(id, payload.into_update_post())
        .await?;
    Ok(Json(PostResponse::from(post)))
}

#[utoipa::path(
    delete,
    path = "/posts/{id}",
    tag = POST_TAG,
    params(
        ("id" = i32, Path, description = "Post ID")
    ),
    responses(
        (status = 200, description = "The deleted post", body = PostResponse),
        (status = 500, description = "Unknown post, post has comments, or storage failure", body = ErrorResponse)
    )
)]
async fn delete_post(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> AppResult<Json<PostResponse>> {
    let Path(id) = id?;
    let post = state.services.posts.delete_post(id).await?;
    Ok(Json(PostResponse::from(post)))
}

#[utoipa::path(
    delete,
    path = "/posts",
    tag = POST_TAG,
    responses(
        (status = 200, description = "Posts deleted", body = DeletedResponse),
        (status = 500, description = "Posts still referenced by comments", body = ErrorResponse)
    )
)]
async fn delete_all_posts(State(state): State<AppState>) -> AppResult<Json<DeletedResponse>> {
    let deleted = state.services.posts.delete_all_posts().await?;
    Ok(Json(DeletedResponse::new(deleted, "posts")))
}
