//! Error handler for converting AppError to HTTP responses.
//!
//! Only a missing reference on create is a client error (400). Every
//! other failure is reported as 500 with the underlying message, so
//! clients see exactly what the storage layer reported.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = error_to_status_code(&self);
        let code = error_to_code(&self);
        let message = self.detail();

        if status.is_client_error() {
            tracing::warn!(code, error = %message, "Request rejected");
        } else {
            tracing::error!(code, error = %message, source = ?self, "Request failed");
        }

        (status, Json(ErrorResponse::new(code, message))).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::MalformedInput {
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::MalformedInput {
            message: rejection.body_text(),
        }
    }
}

/// Maps an AppError variant to its HTTP status code.
///
/// # Status Code Mapping
/// - ReferenceViolation, InvalidReference → 400 BAD_REQUEST
/// - everything else → 500 INTERNAL_SERVER_ERROR
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::ReferenceViolation { .. } | AppError::InvalidReference { .. } => {
            StatusCode::BAD_REQUEST
        }
        AppError::NotFound { .. }
        | AppError::Duplicate { .. }
        | AppError::RestrictViolation { .. }
        | AppError::MalformedInput { .. }
        | AppError::Database { .. }
        | AppError::Configuration { .. }
        | AppError::ConnectionPool { .. }
        | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Maps an AppError variant to its error code string.
pub fn error_to_code(error: &AppError) -> &'static str {
    match error {
        AppError::NotFound { .. } => "NOT_FOUND",
        AppError::Duplicate { .. } => "DUPLICATE_ENTRY",
        AppError::ReferenceViolation { .. } | AppError::InvalidReference { .. } => {
            "INVALID_REFERENCE"
        }
        AppError::RestrictViolation { .. } => "RESTRICTED_DELETE",
        AppError::MalformedInput { .. } => "MALFORMED_INPUT",
        AppError::Database { .. } => "DATABASE_ERROR",
        AppError::Configuration { .. } => "CONFIGURATION_ERROR",
        AppError::ConnectionPool { .. } => "SERVICE_UNAVAILABLE",
        AppError::Internal { .. } => "INTERNAL_ERROR",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_only_reference_errors_are_client_errors() {
        let reference = AppError::InvalidReference {
            message: "bad ref".to_string(),
        };
        assert_eq!(error_to_status_code(&reference), StatusCode::BAD_REQUEST);

        let not_found = AppError::NotFound {
            entity: "post".to_string(),
            field: "id".to_string(),
            value: "1".to_string(),
        };
        assert_eq!(
            error_to_status_code(&not_found),
            StatusCode::INTERNAL_SERVER_ERROR
        );

        let duplicate = AppError::Duplicate {
            entity: "users".to_string(),
            field: "email".to_string(),
            value: "a@b.c".to_string(),
            message: "duplicate key value violates unique constraint \"users_email_key\"".to_string(),
        };
        assert_eq!(
            error_to_status_code(&duplicate),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_invalid_reference_response_body() {
        let response = AppError::InvalidReference {
            message: "Invalid postId or authorId.".to_string(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Invalid postId or authorId.");
        assert_eq!(body["code"], "INVALID_REFERENCE");
    }

    #[tokio::test]
    async fn test_database_error_passes_message_verbatim() {
        let response = AppError::Database {
            operation: "insert post".to_string(),
            source: anyhow::anyhow!("connection reset by peer"),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "connection reset by peer");
        assert_eq!(body["code"], "DATABASE_ERROR");
    }
}
