use diesel::prelude::*;

#[derive(Debug, Queryable, Selectable, Identifiable, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Category {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::categories)]
pub struct NewCategory {
    pub name: String,
}
