use crate::error::ErrorKind;
use crate::model::enums::ResourceType;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::{error, warn};
use utoipa::ToSchema;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub enum ApiError {
    BlockingTask(#[from] tokio::task::JoinError),
    FailedConnection(#[from] diesel::r2d2::PoolError),
    FailedQuery(#[from] diesel::result::Error),
    JsonRejection(#[from] axum::extract::rejection::JsonRejection),
    #[error("{}", .0.missing_fields_message())]
    MissingFields(ResourceType),
    #[error("{0} not found")]
    NotFound(ResourceType),
    PathRejection(#[from] axum::extract::rejection::PathRejection),
    #[error("Endpoint not found")]
    UnknownEndpoint,
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::JsonRejection(err) => err.status(),
            Self::PathRejection(err) => err.status(),
            Self::MissingFields(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) | Self::UnknownEndpoint => StatusCode::NOT_FOUND,
            Self::BlockingTask(_) | Self::FailedConnection(_) | Self::FailedQuery(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("{}: {self}", self.kind());
        } else {
            warn!("{}: {self}", self.kind());
        }
        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

/// Represents a response if an error occured.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}
