use crate::schema::city;
use crate::string::SmallString;
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Insertable)]
#[diesel(table_name = city)]
#[diesel(check_for_backend(Pg))]
pub struct NewCity<'a> {
    pub id: i32,
    pub name: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Identifiable, Queryable, Selectable, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = city)]
#[diesel(check_for_backend(Pg))]
pub struct City {
    pub id: i32,
    #[serde(rename = "city")]
    pub name: SmallString,
}
