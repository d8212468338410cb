use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use staffbook_core::DomainError;
use staffbook_infra::RepositoryError;

/// Failure of a request handler, rendered as `{"error", "message"}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// The request body was not usable JSON for the target type.
    #[error("invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Domain(DomainError::Validation(msg)) => {
                json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
            }
            ApiError::Domain(DomainError::InvalidId(msg)) => {
                json_error(StatusCode::BAD_REQUEST, "invalid_id", msg)
            }
            ApiError::Domain(DomainError::NotFound(msg)) => {
                json_error(StatusCode::NOT_FOUND, "not_found", msg)
            }
            ApiError::InvalidBody(rejection) => {
                json_error(StatusCode::BAD_REQUEST, "invalid_body", rejection.body_text())
            }
            ApiError::Repository(e) => {
                tracing::error!(error = %e, "employee repository failed");
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "repository_error", e.to_string())
            }
        }
    }
}

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
