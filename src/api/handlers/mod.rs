//! HTTP request handlers, one module per resource.

pub mod categories;
pub mod comments;
pub mod health;
pub mod posts;
pub mod users;
