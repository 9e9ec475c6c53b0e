use crate::schema::users;
use crate::string::SmallString;
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(Pg))]
pub struct NewUser<'a> {
    pub name: &'a str,
    pub privilege: &'a str,
    pub password: Option<&'a str>,
}

/// Replacement values for every mutable column. A missing password clears it.
#[derive(AsChangeset)]
#[diesel(treat_none_as_null = true)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(Pg))]
pub struct UserChanges<'a> {
    pub name: &'a str,
    pub privilege: &'a str,
    pub password: Option<&'a str>,
}

/// A registered user.
///
/// Passwords are stored and returned as plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Identifiable, Queryable, Selectable, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(Pg))]
pub struct User {
    pub id: i32,
    pub name: SmallString,
    /// Role label, such as `admin`.
    pub privilege: SmallString,
    pub password: Option<String>,
}
