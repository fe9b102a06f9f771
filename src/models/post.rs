use diesel::prelude::*;

use super::{Category, User};

/// Post model for reading from database.
///
/// A post belongs to exactly one author and to at most one category, which
/// lets diesel group posts under their parents with `belonging_to`.
#[derive(Debug, Queryable, Selectable, Identifiable, Associations, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::posts)]
#[diesel(belongs_to(User, foreign_key = author_id))]
#[diesel(belongs_to(Category, foreign_key = category_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: Option<String>,
    pub published: bool,
    pub author_id: i32,
    pub category_id: Option<i32>,
}

/// NewPost model for inserting new records.
///
/// `published` is left to the column default.
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::posts)]
pub struct NewPost {
    pub title: String,
    pub content: Option<String>,
    pub author_id: i32,
    pub category_id: Option<i32>,
}

/// UpdatePost model for partial updates
/// Derives AsChangeset for UPDATE operations with optional fields
#[derive(Debug, AsChangeset, Clone, Default, PartialEq, Eq)]
#[diesel(table_name = crate::schema::posts)]
pub struct UpdatePost {
    pub title: Option<String>,
    pub content: Option<String>,
    pub published: Option<bool>,
}

impl UpdatePost {
    /// Returns true when no field would change.
    ///
    /// Diesel rejects an UPDATE with an empty SET clause, so callers fall
    /// back to reading the row instead.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.published.is_none()
    }
}
