use diesel::prelude::*;

use super::{Post, User};

#[derive(Debug, Queryable, Selectable, Identifiable, Associations, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::comments)]
#[diesel(belongs_to(Post, foreign_key = post_id))]
#[diesel(belongs_to(User, foreign_key = author_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Comment {
    pub id: i32,
    pub content: String,
    pub post_id: i32,
    pub author_id: i32,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::comments)]
pub struct NewComment {
    pub content: String,
    pub post_id: i32,
    pub author_id: i32,
}
