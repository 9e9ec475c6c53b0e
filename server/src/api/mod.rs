mod city;
mod doc;
mod error;
mod event;
mod extract;
mod info;
mod post;
mod user;

pub use error::{ApiError, ApiResult, ErrorResponse};

use crate::app::AppState;
use crate::model::enums::ResourceType;
use axum::Router;
use axum::response::{IntoResponse, Response};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use std::any::Any;
use time::Date;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::{OpenApi, ToSchema};
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

/// Builds the complete application router: resource endpoints under `/api`, the OpenAPI
/// document and Swagger UI, a JSON 404 for unmatched routes and a JSON 500 for panics.
pub fn routes(state: AppState) -> Router {
    let resources = OpenApiRouter::new()
        .merge(info::routes())
        .merge(user::routes())
        .merge(city::routes())
        .merge(post::routes())
        .merge(event::routes());
    let (router, openapi) = OpenApiRouter::with_openapi(doc::ApiDoc::openapi())
        .nest("/api", resources)
        .split_for_parts();

    let router = router
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", openapi))
        .fallback(unknown_endpoint)
        .method_not_allowed_fallback(unknown_endpoint);
    with_middleware(router).with_state(state)
}

/// CORS must stay the outermost layer so that responses for caught panics carry its
/// headers too.
fn with_middleware<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CorsLayer::permissive())
}

/// Something that can be absent from a create request. Missing values, empty strings and
/// zero ids all count as absent.
pub trait Presence {
    fn is_present(&self) -> bool;
}

impl Presence for String {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl Presence for i32 {
    fn is_present(&self) -> bool {
        *self != 0
    }
}

impl Presence for Date {
    fn is_present(&self) -> bool {
        true
    }
}

/// Filters out values that don't count as present.
pub fn present<T: Presence>(value: Option<T>) -> Option<T> {
    value.filter(Presence::is_present)
}

/// Deserializes an optional non-string field, reading `""` the same as `null`.
pub fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(text)) if text.is_empty() => Ok(None),
        Some(value) => T::deserialize(value).map(Some).map_err(D::Error::custom),
    }
}

/// Response body for successful updates and deletions.
#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    message: String,
}

impl MessageResponse {
    fn updated(resource: ResourceType) -> Self {
        Self {
            message: format!("{resource} updated successfully"),
        }
    }

    fn deleted(resource: ResourceType) -> Self {
        Self {
            message: format!("{resource} deleted successfully"),
        }
    }
}

async fn unknown_endpoint() -> ApiError {
    ApiError::UnknownEndpoint
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    tracing::error!("Request handler panicked: {details}");

    let status = axum::http::StatusCode::INTERNAL_SERVER_ERROR;
    (status, axum::Json(ErrorResponse::new("Internal server error"))).into_response()
}
