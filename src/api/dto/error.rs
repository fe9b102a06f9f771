//! Error response DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of every failed request.
///
/// `error` carries the client message: the fixed reference message for
/// 400 responses, the underlying failure message for 500 responses.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "error": "Invalid authorId or categoryId. Make sure the user and category exist first.",
    "code": "INVALID_REFERENCE"
}))]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ErrorResponse {
    pub fn new(code: &str, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.to_string(),
        }
    }
}
