use crate::api::doc::CITY_TAG;
use crate::api::extract::{Json, Path};
use crate::api::{self, ApiError, ApiResult, ErrorResponse};
use crate::app::AppState;
use crate::model::city::{City, NewCity};
use crate::model::enums::ResourceType;
use crate::schema::city;
use axum::extract::State;
use axum::http::StatusCode;
use diesel::{Insertable, OptionalExtension, QueryDsl, RunQueryDsl, SelectableHelper};
use serde::Deserialize;
use utoipa::ToSchema;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list, create))
        .routes(routes!(get))
}

/// Lists all cities.
#[utoipa::path(
    get,
    path = "/cities",
    tag = CITY_TAG,
    responses(
        (status = 200, description = "List of cities", body = Vec<City>),
        (status = 500, description = "Database error", body = ErrorResponse),
    ),
)]
async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<City>>> {
    state
        .run_query(|conn| city::table.select(City::as_select()).order_by(city::id).load(conn))
        .await
        .map(Json)
}

/// Retrieves a single city.
#[utoipa::path(
    get,
    path = "/cities/{id}",
    tag = CITY_TAG,
    params(
        ("id" = i32, Path, description = "City id"),
    ),
    responses(
        (status = 200, body = City),
        (status = 404, description = "City does not exist", body = ErrorResponse),
    ),
)]
async fn get(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<Json<City>> {
    state
        .run_query(move |conn| {
            city::table
                .find(id)
                .select(City::as_select())
                .first(conn)
                .optional()?
                .ok_or(ApiError::NotFound(ResourceType::City))
        })
        .await
        .map(Json)
}

/// Request body for creating a city.
#[derive(Deserialize, ToSchema)]
struct CityCreateBody {
    /// Chosen by the client.
    #[serde(default, deserialize_with = "api::empty_as_none")]
    id: Option<i32>,
    /// City name.
    city: Option<String>,
}

/// Creates a new city with a caller-supplied id.
#[utoipa::path(
    post,
    path = "/cities",
    tag = CITY_TAG,
    request_body = CityCreateBody,
    responses(
        (status = 201, description = "Created city", body = City),
        (status = 400, description = "Id or name is missing", body = ErrorResponse),
        (status = 500, description = "Id is already taken or database error", body = ErrorResponse),
    ),
)]
async fn create(
    State(state): State<AppState>,
    Json(body): Json<CityCreateBody>,
) -> ApiResult<(StatusCode, Json<City>)> {
    let (Some(id), Some(name)) = (api::present(body.id), api::present(body.city)) else {
        return Err(ApiError::MissingFields(ResourceType::City));
    };

    state
        .run_query(move |conn| {
            NewCity { id, name: &name }
                .insert_into(city::table)
                .returning(City::as_returning())
                .get_result(conn)
        })
        .await
        .map(|city| (StatusCode::CREATED, Json(city)))
}
