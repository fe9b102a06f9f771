//! Comment request handlers.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::COMMENT_TAG;
use crate::api::dto::{
    CommentWithRelationsResponse, CreateCommentRequest, DeletedResponse, ErrorResponse,
};
use crate::error::AppResult;
use crate::state::AppState;

pub fn comment_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(list_comments, create_comment, delete_all_comments))
}

#[utoipa::path(
    get,
    path = "/comments",
    tag = COMMENT_TAG,
    responses(
        (status = 200, description = "All comments with author and post", body = Vec<CommentWithRelationsResponse>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn list_comments(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CommentWithRelationsResponse>>> {
    let comments = state.services.comments.list_comments().await?;
    Ok(Json(
        comments
            .into_iter()
            .map(CommentWithRelationsResponse::from)
            .collect(),
    ))
}

#[utoipa::path(
    post,
    path = "/comments",
    tag = COMMENT_TAG,
    request_body = CreateCommentRequest,
    responses(
        (status = 200, description = "Comment created with author and post", body = CommentWithRelationsResponse),
        (status = 400, description = "Post or author does not exist", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn create_comment(
    State(state): State<AppState>,
    payload: Result<Json<CreateCommentRequest>, JsonRejection>,
) -> AppResult<Json<CommentWithRelationsResponse>> {
    let Json(payload) = payload?;
    let created = state
        .services
        .comments
        .create_comment(payload.into_new_comment())
        .await?;
    Ok(Json(CommentWithRelationsResponse::from(created)))
}

#[utoipa::path(
    delete,
    path = "/comments",
    tag = COMMENT_TAG,
    responses(
        (status = 200, description = "Comments deleted", body = DeletedResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn delete_all_comments(State(state): State<AppState>) -> AppResult<Json<DeletedResponse>> {
    let deleted = state.services.comments.delete_all_comments().await?;
    Ok(Json(DeletedResponse::new(deleted, "comments")))
}
