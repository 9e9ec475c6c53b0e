use crate::api::doc::INFO_TAG;
use crate::api::extract::Json;
use crate::app::AppState;
use serde::Serialize;
use utoipa::ToSchema;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(health))
}

#[derive(Serialize, ToSchema)]
struct Health {
    status: &'static str,
}

/// Reports that the server is running. Doesn't touch the database.
#[utoipa::path(
    get,
    path = "/health",
    tag = INFO_TAG,
    responses(
        (status = 200, body = Health),
    ),
)]
async fn health() -> Json<Health> {
    Json(Health {
        status: "Server is running",
    })
}
