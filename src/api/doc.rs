use utoipa::OpenApi;

pub const USER_TAG: &str = "Users";
pub const POST_TAG: &str = "Posts";
pub const CATEGORY_TAG: &str = "Categories";
pub const COMMENT_TAG: &str = "Comments";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Blog API",
        description = "CRUD API for users, posts, categories and comments",
    ),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
        )
    ),
    tags(
        (name = USER_TAG, description = "User endpoints"),
        (name = POST_TAG, description = "Post endpoints"),
        (name = CATEGORY_TAG, description = "Category endpoints"),
        (name = COMMENT_TAG, description = "Comment endpoints"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;
