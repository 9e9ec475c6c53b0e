use crate::api::doc::USER_TAG;
use crate::api::extract::{Json, Path};
use crate::api::{self, ApiError, ApiResult, ErrorResponse, MessageResponse};
use crate::app::AppState;
use crate::model::enums::ResourceType;
use crate::model::user::{NewUser, User, UserChanges};
use crate::schema::users;
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
        .routes(routes!(get, update, delete))
}

/// Lists all users.
#[utoipa::path(
    get,
    path = "/users",
    tag = USER_TAG,
    responses(
        (status = 200, description = "List of users", body = Vec<User>),
        (status = 500, description = "Database error", body = ErrorResponse),
    ),
)]
async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    state
        .run_query(|conn| {
            users::table
                .select(User::as_select())
                .order_by(users::id)
                .load(conn)
        })
        .await
        .map(Json)
}

/// Retrieves a single user.
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = USER_TAG,
    params(
        ("id" = i32, Path, description = "User id"),
    ),
    responses(
        (status = 200, body = User),
        (status = 404, description = "User does not exist", body = ErrorResponse),
    ),
)]
async fn get(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<Json<User>> {
    state
        .run_query(move |conn| {
            users::table
                .find(id)
                .select(User::as_select())
                .first(conn)
                .optional()?
                .ok_or(ApiError::NotFound(ResourceType::User))
        })
        .await
        .map(Json)
}

/// Request body for creating a user.
#[derive(Deserialize, ToSchema)]
struct UserCreateBody {
    name: Option<String>,
    /// Role label, such as `admin`.
    privilege: Option<String>,
    /// Stored as plaintext.
    password: Option<String>,
}

/// Creates a new user.
///
/// `name` and `privilege` are required.
#[utoipa::path(
    post,
    path = "/users",
    tag = USER_TAG,
    request_body = UserCreateBody,
    responses(
        (status = 201, description = "Created user", body = User),
        (status = 400, description = "Name or privilege is missing", body = ErrorResponse),
    ),
)]
async fn create(
    State(state): State<AppState>,
    Json(body): Json<UserCreateBody>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let (Some(name), Some(privilege)) = (api::present(body.name), api::present(body.privilege)) else {
        return Err(ApiError::MissingFields(ResourceType::User));
    };
    let password = api::present(body.password);

    state
        .run_query(move |conn| {
            let new_user = NewUser {
                name: &name,
                privilege: &privilege,
                password: password.as_deref(),
            };
            new_user
                .insert_into(users::table)
                .returning(User::as_returning())
                .get_result(conn)
        })
        .await
        .map(|user| (StatusCode::CREATED, Json(user)))
}

/// Request body for updating a user.
#[derive(Deserialize, ToSchema)]
struct UserUpdateBody {
    name: String,
    privilege: String,
    /// Omitting the password clears it.
    password: Option<String>,
}

/// Replaces the name, privilege and password of a user.
///
/// Succeeds even if no user has the given id.
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = USER_TAG,
    params(
        ("id" = i32, Path, description = "User id"),
    ),
    request_body = UserUpdateBody,
    responses(
        (status = 200, body = MessageResponse),
    ),
)]
async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UserUpdateBody>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .run_query(move |conn| {
            let changes = UserChanges {
                name: &body.name,
                privilege: &body.privilege,
                password: body.password.as_deref(),
            };
            diesel::update(users::table.find(id)).set(&changes).execute(conn)
        })
        .await?;
    Ok(Json(MessageResponse::updated(ResourceType::User)))
}

/// Deletes a user.
///
/// Succeeds even if no user has the given id.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = USER_TAG,
    params(
        ("id" = i32, Path, description = "User id"),
    ),
    responses(
        (status = 200, body = MessageResponse),
    ),
)]
async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<Json<MessageResponse>> {
    state
        .run_query(move |conn| diesel::delete(users::table.find(id)).execute(conn))
        .await?;
    Ok(Json(MessageResponse::deleted(ResourceType::User)))
}

#[cfg(test)]
mod test {
    use crate::model::user::User;
    use crate::schema::users;
    use crate::test::*;
    use axum::http::StatusCode;
    use diesel::{QueryDsl, RunQueryDsl};
    use serde_json::json;
    use serial_test::serial;

    #[tokio::test]
    async fn create_requires_name_and_privilege() {
        let server = offline_server();
        for body in [
            json!({}),
            json!({ "name": "Jonas" }),
            json!({ "privilege": "admin" }),
            json!({ "name": "", "privilege": "admin" }),
            json!({ "name": "Jonas", "privilege": null }),
        ] {
            let response = server.post("/api/users").json(&body).await;
            response.assert_status(StatusCode::BAD_REQUEST);
            response.assert_json(&json!({ "error": "Name and privilege are required" }));
        }
    }

    #[tokio::test]
    async fn database_unreachable() {
        let server = offline_server();
        let response = server.get("/api/users").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_error_message(&response);

        let response = server
            .post("/api/users")
            .json(&json!({ "name": "Jonas", "privilege": "admin" }))
            .await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_error_message(&response);
    }

    #[tokio::test]
    #[serial]
    #[ignore = "requires a PostgreSQL database loaded with sql/schema.sql"]
    async fn create_and_get() {
        let server = database_server();
        let response = server
            .post("/api/users")
            .json(&json!({ "name": "Jonas", "privilege": "admin" }))
            .await;
        response.assert_status(StatusCode::CREATED);

        let user: User = response.json();
        assert_eq!(&*user.name, "Jonas");
        assert_eq!(&*user.privilege, "admin");
        assert_eq!(user.password, None);
        response.assert_json(&json!({ "id": user.id, "name": "Jonas", "privilege": "admin", "password": null }));

        let response = server.get(&format!("/api/users/{}", user.id)).await;
        response.assert_status_ok();
        assert_eq!(response.json::<User>(), user);

        let listed: Vec<User> = server.get("/api/users").await.json();
        assert!(listed.contains(&user));

        server.delete(&format!("/api/users/{}", user.id)).await.assert_status_ok();
        server
            .get(&format!("/api/users/{}", user.id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    #[serial]
    #[ignore = "requires a PostgreSQL database loaded with sql/schema.sql"]
    async fn rejected_create_persists_nothing() {
        let state = database_state();
        let mut conn = state.connection_pool.get().unwrap();
        let user_count: i64 = users::table.count().get_result(&mut conn).unwrap();

        let server = test_server(state.clone());
        server
            .post("/api/users")
            .json(&json!({ "name": "Nobody" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        let new_user_count: i64 = users::table.count().get_result(&mut conn).unwrap();
        assert_eq!(new_user_count, user_count);
    }

    #[tokio::test]
    #[serial]
    #[ignore = "requires a PostgreSQL database loaded with sql/schema.sql"]
    async fn update() {
        let server = database_server();
        let user: User = server
            .post("/api/users")
            .json(&json!({ "name": "Ona", "privilege": "user", "password": "hunter2" }))
            .await
            .json();
        assert_eq!(user.password.as_deref(), Some("hunter2"));

        let response = server
            .put(&format!("/api/users/{}", user.id))
            .json(&json!({ "name": "Ona", "privilege": "admin" }))
            .await;
        response.assert_status_ok();
        response.assert_json(&json!({ "message": "User updated successfully" }));

        let updated: User = server.get(&format!("/api/users/{}", user.id)).await.json();
        assert_eq!(&*updated.privilege, "admin");
        assert_eq!(updated.password, None);

        server.delete(&format!("/api/users/{}", user.id)).await.assert_status_ok();
    }

    #[tokio::test]
    #[serial]
    #[ignore = "requires a PostgreSQL database loaded with sql/schema.sql"]
    async fn nonexistent() {
        let server = database_server();
        let response = server.get("/api/users/999999").await;
        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_json(&json!({ "error": "User not found" }));

        let response = server
            .put("/api/users/999999")
            .json(&json!({ "name": "Ghost", "privilege": "none" }))
            .await;
        response.assert_status_ok();

        let response = server.delete("/api/users/999999").await;
        response.assert_status_ok();
        response.assert_json(&json!({ "message": "User deleted successfully" }));
    }
}
