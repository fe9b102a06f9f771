//! Response for bulk deletes.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"message": "Deleted 3 posts"}))]
pub struct DeletedResponse {
    pub message: String,
}

impl DeletedResponse {
    /// `plural` is the resource name, e.g. "users".
    pub fn new(count: usize, plural: &str) -> Self {
        Self {
            message: format!("Deleted {} {}", count, plural),
        }
    }
}
