use crate::api::doc::POST_TAG;
use crate::api::extract::{Json, Path};
use crate::api::{self, ApiError, ApiResult, ErrorResponse, MessageResponse};
use crate::app::AppState;
use crate::model::enums::ResourceType;
use crate::model::post::{NewPost, Post, PostChanges};
use crate::schema::posts;
use axum::extract::State;
use axum::http::StatusCode;
use diesel::{ExpressionMethods, Insertable, OptionalExtension, QueryDsl, RunQueryDsl, SelectableHelper};
use serde::Deserialize;
use utoipa::ToSchema;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list, create))
        .routes(routes!(get, update, delete))
        .routes(routes!(list_by_user))
}

/// Lists all posts, newest first.
#[utoipa::path(
    get,
    path = "/posts",
    tag = POST_TAG,
    responses(
        (status = 200, description = "List of posts", body = Vec<Post>),
        (status = 500, description = "Database error", body = ErrorResponse),
    ),
)]
async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Post>>> {
    state
        .run_query(|conn| {
            posts::table
                .select(Post::as_select())
                .order_by((posts::created_at.desc(), posts::id.desc()))
                .load(conn)
        })
        .await
        .map(Json)
}

/// Lists the posts written by a user, newest first.
///
/// An unknown user simply has no posts.
#[utoipa::path(
    get,
    path = "/users/{user_id}/posts",
    tag = POST_TAG,
    params(
        ("user_id" = i32, Path, description = "Author's user id"),
    ),
    responses(
        (status = 200, description = "Posts by the user", body = Vec<Post>),
        (status = 500, description = "Database error", body = ErrorResponse),
    ),
)]
async fn list_by_user(State(state): State<AppState>, Path(user_id): Path<i32>) -> ApiResult<Json<Vec<Post>>> {
    state
        .run_query(move |conn| {
            posts::table
                .filter(posts::user_id.eq(user_id))
                .select(Post::as_select())
                .order_by((posts::created_at.desc(), posts::id.desc()))
                .load(conn)
        })
        .await
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/posts/{id}",
    tag = POST_TAG,
    params(
        ("id" = i32, Path, description = "Post id"),
    ),
    responses(
        (status = 200, body = Post),
        (status = 404, description = "Post does not exist", body = ErrorResponse),
    ),
)]
async fn get(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<Json<Post>> {
    state
        .run_query(move |conn| {
            posts::table
                .find(id)
                .select(Post::as_select())
                .first(conn)
                .optional()?
                .ok_or(ApiError::NotFound(ResourceType::Post))
        })
        .await
        .map(Json)
}

#[derive(Deserialize, ToSchema)]
struct PostCreateBody {
    title: Option<String>,
    body: Option<String>,
    /// Author. Must reference an existing user.
    #[serde(default, deserialize_with = "api::empty_as_none")]
    user_id: Option<i32>,
}

/// Creates a new post. The creation time is assigned by the database.
#[utoipa::path(
    post,
    path = "/posts",
    tag = POST_TAG,
    request_body = PostCreateBody,
    responses(
        (status = 201, description = "Created post", body = Post),
        (status = 400, description = "Title, body or user_id is missing", body = ErrorResponse),
        (status = 500, description = "Author does not exist or database error", body = ErrorResponse),
    ),
)]
async fn create(
    State(state): State<AppState>,
    Json(body): Json<PostCreateBody>,
) -> ApiResult<(StatusCode, Json<Post>)> {
    let (Some(title), Some(text), Some(user_id)) =
        (api::present(body.title), api::present(body.body), api::present(body.user_id))
    else {
        return Err(ApiError::MissingFields(ResourceType::Post));
    };

    state
        .run_query(move |conn| {
            let new_post = NewPost {
                title: &title,
                body: &text,
                user_id,
            };
            new_post
                .insert_into(posts::table)
                .returning(Post::as_returning())
                .get_result(conn)
        })
        .await
        .map(|post| (StatusCode::CREATED, Json(post)))
}

#[derive(Deserialize, ToSchema)]
struct PostUpdateBody {
    title: String,
    body: String,
}

/// Replaces the title and body of a post. The author and creation time never change.
#[utoipa::path(
    put,
    path = "/posts/{id}",
    tag = POST_TAG,
    params(
        ("id" = i32, Path, description = "Post id"),
    ),
    request_body = PostUpdateBody,
    responses(
        (status = 200, body = MessageResponse),
    ),
)]
async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<PostUpdateBody>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .run_query(move |conn| {
            let changes = PostChanges {
                title: &body.title,
                body: &body.body,
            };
            diesel::update(posts::table.find(id)).set(&changes).execute(conn)
        })
        .await?;
    Ok(Json(MessageResponse::updated(ResourceType::Post)))
}

#[utoipa::path(
    delete,
    path = "/posts/{id}",
    tag = POST_TAG,
    params(
        ("id" = i32, Path, description = "Post id"),
    ),
    responses(
        (status = 200, body = MessageResponse),
    ),
)]
async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<Json<MessageResponse>> {
    state
        .run_query(move |conn| diesel::delete(posts::table.find(id)).execute(conn))
        .await?;
    Ok(Json(MessageResponse::deleted(ResourceType::Post)))
}
