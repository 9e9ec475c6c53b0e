use crate::api::doc::EVENT_TAG;
use crate::api::extract::{Json, Path};
use crate::api::{self, ApiError, ApiResult, ErrorResponse, MessageResponse};
use crate::app::AppState;
use crate::model::enums::ResourceType;
use crate::model::event::{Event, EventChanges, NewEvent};
use crate::schema::event;
use axum::extract::State;
use axum::http::StatusCode;
use diesel::{Insertable, OptionalExtension, QueryDsl, RunQueryDsl, SelectableHelper};
use serde::Deserialize;
use time::Date;
use utoipa::ToSchema;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list, create))
        .routes(routes!(get, update, delete))
}

/// Lists all events.
#[utoipa::path(
    get,
    path = "/events",
    tag = EVENT_TAG,
    responses(
        (status = 200, description = "List of events", body = Vec<Event>),
        (status = 500, description = "Database error", body = ErrorResponse),
    ),
)]
async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Event>>> {
    state
        .run_query(|conn| event::table.select(Event::as_select()).order_by(event::id).load(conn))
        .await
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/events/{id}",
    tag = EVENT_TAG,
    params(
        ("id" = i32, Path, description = "Event id"),
    ),
    responses(
        (status = 200, body = Event),
        (status = 404, description = "Event does not exist", body = ErrorResponse),
    ),
)]
async fn get(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<Json<Event>> {
    state
        .run_query(move |conn| {
            event::table
                .find(id)
                .select(Event::as_select())
                .first(conn)
                .optional()?
                .ok_or(ApiError::NotFound(ResourceType::Event))
        })
        .await
        .map(Json)
}

/// Request body for creating an event.
#[derive(Deserialize, ToSchema)]
struct EventCreateBody {
    /// Chosen by the client.
    #[serde(default, deserialize_with = "api::empty_as_none")]
    id: Option<i32>,
    event_name: Option<String>,
    description: Option<String>,
    /// Calendar date, formatted as `YYYY-MM-DD`.
    #[serde(default, deserialize_with = "api::empty_as_none")]
    date: Option<Date>,
    /// Must reference an existing city.
    #[serde(default, deserialize_with = "api::empty_as_none")]
    city_id: Option<i32>,
    #[serde(default, deserialize_with = "api::empty_as_none")]
    rating_id: Option<i32>,
}

/// Creates a new event with a caller-supplied id.
///
/// Every field except `rating_id` is required.
#[utoipa::path(
    post,
    path = "/events",
    tag = EVENT_TAG,
    request_body = EventCreateBody,
    responses(
        (status = 201, description = "Created event", body = Event),
        (status = 400, description = "A required field is missing", body = ErrorResponse),
        (status = 500, description = "Id is taken, city does not exist or database error", body = ErrorResponse),
    ),
)]
async fn create(
    State(state): State<AppState>,
    Json(body): Json<EventCreateBody>,
) -> ApiResult<(StatusCode, Json<Event>)> {
    let (Some(id), Some(event_name), Some(description), Some(date), Some(city_id)) = (
        api::present(body.id),
        api::present(body.event_name),
        api::present(body.description),
        api::present(body.date),
        api::present(body.city_id),
    ) else {
        return Err(ApiError::MissingFields(ResourceType::Event));
    };
    let rating_id = api::present(body.rating_id);

    state
        .run_query(move |conn| {
            let new_event = NewEvent {
                id,
                event_name: &event_name,
                description: &description,
                date,
                city_id,
                rating_id,
            };
            new_event
                .insert_into(event::table)
                .returning(Event::as_returning())
                .get_result(conn)
        })
        .await
        .map(|event| (StatusCode::CREATED, Json(event)))
}

#[derive(Deserialize, ToSchema)]
struct EventUpdateBody {
    event_name: String,
    description: String,
    date: Date,
    city_id: i32,
    /// Omitting the rating clears it.
    rating_id: Option<i32>,
}

/// Replaces every field of an event except its id.
#[utoipa::path(
    put,
    path = "/events/{id}",
    tag = EVENT_TAG,
    params(
        ("id" = i32, Path, description = "Event id"),
    ),
    request_body = EventUpdateBody,
    responses(
        (status = 200, body = MessageResponse),
        (status = 500, description = "City does not exist or database error", body = ErrorResponse),
    ),
)]
async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<EventUpdateBody>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .run_query(move |conn| {
            let changes = EventChanges {
                event_name: &body.event_name,
                description: &body.description,
                date: body.date,
                city_id: body.city_id,
                rating_id: body.rating_id,
            };
            diesel::update(event::table.find(id)).set(&changes).execute(conn)
        })
        .await?;
    Ok(Json(MessageResponse::updated(ResourceType::Event)))
}

#[utoipa::path(
    delete,
    path = "/events/{id}",
    tag = EVENT_TAG,
    params(
        ("id" = i32, Path, description = "Event id"),
    ),
    responses(
        (status = 200, body = MessageResponse),
    ),
)]
async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<Json<MessageResponse>> {
    state
        .run_query(move |conn| diesel::delete(event::table.find(id)).execute(conn))
        .await?;
    Ok(Json(MessageResponse::deleted(ResourceType::Event)))
}

#[cfg(test)]
mod test {
    use crate::model::event::Event;
    use crate::model::enums::ResourceType;
    use crate::test::*;
    use axum::http::StatusCode;
    use serde_json::json;
    use serial_test::serial;
    use time::macros::date;

    #[tokio::test]
    async fn create_requires_all_but_rating() {
        let server = offline_server();
        let complete = json!({
            "id": 1,
            "event_name": "Jazz Night",
            "description": "Live music",
            "date": "2025-06-21",
            "city_id": 1
        });
        for field in ["id", "event_name", "description", "date", "city_id"] {
            let mut body = complete.clone();
            body.as_object_mut().unwrap().remove(field);

            let response = server.post("/api/events").json(&body).await;
            response.assert_status(StatusCode::BAD_REQUEST);
            response.assert_json(&json!({ "error": "All fields except rating_id are required" }));
        }

        for field in ["id", "event_name", "description", "date", "city_id"] {
            let mut body = complete.clone();
            body[field] = json!("");

            let response = server.post("/api/events").json(&body).await;
            response.assert_status(StatusCode::BAD_REQUEST);
            response.assert_json(&json!({ "error": "All fields except rating_id are required" }));
        }
    }

    #[tokio::test]
    async fn empty_rating_is_absent() {
        // Passes validation, so the request only fails once it reaches the database
        let server = offline_server();
        let response = server
            .post("/api/events")
            .json(&json!({
                "id": 1,
                "event_name": "Jazz Night",
                "description": "Live music",
                "date": "2025-06-21",
                "city_id": 1,
                "rating_id": ""
            }))
            .await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_error_message(&response);
    }

    #[tokio::test]
    async fn malformed_date() {
        let server = offline_server();
        let response = server
            .post("/api/events")
            .json(&json!({
                "id": 1,
                "event_name": "Jazz Night",
                "description": "Live music",
                "date": "June 21st",
                "city_id": 1
            }))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert_error_message(&response);
    }

    #[tokio::test]
    #[serial]
    #[ignore = "requires a PostgreSQL database loaded with sql/schema.sql"]
    async fn lifecycle() {
        let server = database_server();
        let city_id = unused_id(ResourceType::City);
        server
            .post("/api/cities")
            .json(&json!({ "id": city_id, "city": "Šiauliai" }))
            .await
            .assert_status(StatusCode::CREATED);

        let id = unused_id(ResourceType::Event);
        let response = server
            .post("/api/events")
            .json(&json!({
                "id": id,
                "event_name": "Jazz Night",
                "description": "Live music",
                "date": "2025-06-21",
                "city_id": city_id,
                "rating_id": 5
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let event: Event = response.json();
        assert_eq!(event.id, id);
        assert_eq!(event.date, date!(2025 - 06 - 21));
        assert_eq!(event.rating_id, Some(5));

        let response = server
            .put(&format!("/api/events/{id}"))
            .json(&json!({
                "event_name": "Jazz Night",
                "description": "Moved indoors",
                "date": "2025-06-22",
                "city_id": city_id
            }))
            .await;
        response.assert_json(&json!({ "message": "Event updated successfully" }));

        let updated: Event = server.get(&format!("/api/events/{id}")).await.json();
        assert_eq!(updated.description, "Moved indoors");
        assert_eq!(updated.date, date!(2025 - 06 - 22));
        assert_eq!(updated.rating_id, None);

        let listed: Vec<Event> = server.get("/api/events").await.json();
        assert!(listed.contains(&updated));

        let response = server.delete(&format!("/api/events/{id}")).await;
        response.assert_json(&json!({ "message": "Event deleted successfully" }));
        server
            .get(&format!("/api/events/{id}"))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    #[serial]
    #[ignore = "requires a PostgreSQL database loaded with sql/schema.sql"]
    async fn nonexistent() {
        let server = database_server();
        let response = server.get("/api/events/9999").await;
        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_json(&json!({ "error": "Event not found" }));

        let response = server
            .post("/api/events")
            .json(&json!({
                "id": unused_id(ResourceType::Event),
                "event_name": "Nowhere",
                "description": "No such city",
                "date": "2025-01-01",
                "city_id": -1
            }))
            .await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_error_message(&response);
    }
}
