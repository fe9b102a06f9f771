//! Router configuration for the API.
//!
//! Collects every resource router into one `OpenApiRouter`, serves the
//! generated document through Swagger UI and applies the middleware stack.

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{logging_middleware, request_id_middleware};
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Layers run in reverse order of declaration:
/// 1. Request ID middleware generates or propagates the request id
/// 2. Logging middleware logs the request under that id
/// 3. Compression and CORS wrap the handler response
///
/// # Example
/// ```ignore
/// let state = AppState::new(pool);
/// let router = create_router(state);
/// ```
pub fn create_router(state: AppState) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(handlers::users::user_routes())
        .merge(handlers::posts::post_routes())
        .merge(handlers::categories::category_routes())
        .merge(handlers::comments::comment_routes())
        .merge(handlers::health::health_routes())
        .split_for_parts();

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_openapi_document_lists_resources() {
        let response = create_router(AppState::in_memory())
            .oneshot(
                Request::builder()
                    .uri("/api-docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let doc: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        for path in ["/users", "/users/{id}", "/posts", "/posts/{id}", "/categories", "/comments"] {
            assert!(doc["paths"].get(path).is_some(), "missing path {}", path);
        }
    }
}
