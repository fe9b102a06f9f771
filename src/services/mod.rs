//! Service layer for business logic operations.
//!
//! Services sit between handlers and the storage traits and translate
//! storage failures into client-facing errors where needed.

mod category_service;
mod comment_service;
mod post_service;
mod user_service;

pub use category_service::CategoryService;
pub use comment_service::{CommentService, INVALID_COMMENT_REFERENCE};
pub use post_service::{INVALID_POST_REFERENCE, PostService};
pub use user_service::UserService;

use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// Cloning is cheap since every service holds an `Arc`.
#[derive(Clone)]
pub struct Services {
    pub users: UserService,
    pub posts: PostService,
    pub categories: CategoryService,
    pub comments: CommentService,
}

impl Services {
    pub fn new(repos: Repositories) -> Self {
        Self {
            users: UserService::new(repos.users),
            posts: PostService::new(repos.posts),
            categories: CategoryService::new(repos.categories),
            comments: CommentService::new(repos.comments),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::{NewComment, NewPost, NewUser};

    #[tokio::test]
    async fn test_create_post_with_missing_author_uses_fixed_message() {
        let services = Services::new(Repositories::in_memory());

        let err = services
            .posts
            .create_post(NewPost {
                title: "Orphan".to_string(),
                content: None,
                author_id: 1,
                category_id: None,
            })
            .await
            .unwrap_err();

        match err {
            AppError::InvalidReference { message } => {
                assert_eq!(message, INVALID_POST_REFERENCE)
            }
            other => panic!("Expected InvalidReference, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_comment_with_missing_author_uses_fixed_message() {
        let services = Services::new(Repositories::in_memory());
        let user = services
            .users
            .create_user(NewUser {
                email: "writer@example.com".to_string(),
                name: None,
            })
            .await
            .unwrap();
        let post = services
            .posts
            .create_post(NewPost {
                title: "First".to_string(),
                content: None,
                author_id: user.id,
                category_id: None,
            })
            .await
            .unwrap();

        let err = services
            .comments
            .create_comment(NewComment {
                content: "Hi".to_string(),
                post_id: post.id,
                author_id: user.id + 100,
            })
            .await
            .unwrap_err();

        assert!(
            matches!(err, AppError::InvalidReference { ref message } if message == INVALID_COMMENT_REFERENCE)
        );
    }

    #[tokio::test]
    async fn test_duplicate_email_is_not_a_reference_error() {
        let services = Services::new(Repositories::in_memory());
        let new_user = NewUser {
            email: "same@example.com".to_string(),
            name: None,
        };
        services.users.create_user(new_user.clone()).await.unwrap();

        let err = services.users.create_user(new_user).await.unwrap_err();
        assert!(matches!(err, AppError::Duplicate { .. }));
    }
}
