use crate::shared::error::SbomError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Body returned by every endpoint on failure
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

/// Error type returned by handlers
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                message: self.message,
            }),
        )
            .into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast_ref::<SbomError>() {
            Some(SbomError::Validation { message }) => ApiError::validation(message.clone()),
            Some(SbomError::SbomNotFound { id }) => {
                tracing::debug!(id = %id, "SBOM not found");
                ApiError::not_found("SBOM not found")
            }
            Some(e @ SbomError::NvdApiKeyMissing) => ApiError::validation(e.to_string()),
            Some(e @ SbomError::NvdRequestFailed { .. }) => {
                tracing::warn!("{}", e);
                ApiError::new(StatusCode::BAD_GATEWAY, e.to_string())
            }
            _ => {
                tracing::error!("Internal error: {:#}", err);
                ApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred",
                )
            }
        }
    }
}
