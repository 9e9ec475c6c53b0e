use crate::schema::event;
use crate::string::SmallString;
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use time::Date;
use utoipa::ToSchema;

#[derive(Insertable)]
#[diesel(table_name = event)]
#[diesel(check_for_backend(Pg))]
pub struct NewEvent<'a> {
    pub id: i32,
    pub event_name: &'a str,
    pub description: &'a str,
    pub date: Date,
    pub city_id: i32,
    pub rating_id: Option<i32>,
}

/// Replacement values for every mutable column. A missing rating clears it.
#[derive(AsChangeset)]
#[diesel(treat_none_as_null = true)]
#[diesel(table_name = event)]
#[diesel(check_for_backend(Pg))]
pub struct EventChanges<'a> {
    pub event_name: &'a str,
    pub description: &'a str,
    pub date: Date,
    pub city_id: i32,
    pub rating_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Identifiable, Queryable, Selectable, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = event)]
#[diesel(check_for_backend(Pg))]
pub struct Event {
    pub id: i32,
    pub event_name: SmallString,
    pub description: String,
    pub date: Date,
    pub city_id: i32,
    /// Not checked against any table.
    pub rating_id: Option<i32>,
}
