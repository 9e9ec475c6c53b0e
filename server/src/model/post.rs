use crate::schema::posts;
use crate::string::SmallString;
use crate::time::DateTime;
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Insertable)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(Pg))]
pub struct NewPost<'a> {
    pub title: &'a str,
    pub body: &'a str,
    pub user_id: i32,
}

#[derive(AsChangeset)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(Pg))]
pub struct PostChanges<'a> {
    pub title: &'a str,
    pub body: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Identifiable, Queryable, Selectable, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(Pg))]
pub struct Post {
    pub id: i32,
    pub title: SmallString,
    pub body: String,
    pub user_id: i32,
    /// Assigned by the database on insertion.
    pub created_at: DateTime,
}
