//! User request handlers.

use axum::{
    Json,
    extract::{Path, State, rejection::{JsonRejection, PathRejection}},
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::USER_TAG;
use crate::api::dto::{CreateUserRequest, DeletedResponse, ErrorResponse, UserWithPostsResponse};
use crate::error::AppResult;
use crate::state::AppState;

/// Routes:
/// - GET /users         - List users with their posts
/// - POST /users        - Create a user
/// - DELETE /users      - Delete all users
/// - GET /users/{id}    - Get one user with their posts
pub fn user_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_users, create_user, delete_all_users))
        .routes(routes!(get_user))
}

#[utoipa::path(
    get,
    path = "/users",
    tag = USER_TAG,
    responses(
        (status = 200, description = "All users with their posts", body = Vec<UserWithPostsResponse>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserWithPostsResponse>>> {
    let users = state.services.users.list_users().await?;
    Ok(Json(
        users.into_iter().map(UserWithPostsResponse::from).collect(),
    ))
}

/// Responds with `null` when no user has the id.
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = USER_TAG,
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "The user, or null if absent", body = Option<UserWithPostsResponse>),
        (status = 500, description = "Malformed id or storage failure", body = ErrorResponse)
    )
)]
async fn get_user(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> AppResult<Json<Option<UserWithPostsResponse>>> {
    let Path(id) = id?;
    let user = state.services.users.get_user(id).await?;
    Ok(Json(user.map(UserWithPostsResponse::from)))
}

#[utoipa::path(
    post,
    path = "/users",
    tag = USER_TAG,
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created", body = UserWithPostsResponse),
        (status = 500, description = "Duplicate email or storage failure", body = ErrorResponse)
    )
)]
async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> AppResult<Json<UserWithPostsResponse>> {
    let Json(payload) = payload?;
    let user = state
        .services
        .users
        .create_user(payload.into_new_user())
        .await?;
    Ok(Json(UserWithPostsResponse::from((user, Vec::new()))))
}

#[utoipa::path(
    delete,
    path = "/users",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Users deleted", body = DeletedResponse),
        (status = 500, description = "Users still referenced by posts or comments", body = ErrorResponse)
    )
)]
async fn delete_all_users(State(state): State<AppState>) -> AppResult<Json<DeletedResponse>> {
    let deleted = state.services.users.delete_all_users().await?;
    Ok(Json(DeletedResponse::new(deleted, "users")))
}
