//! Axum-specific error types and mappings.
//!
//! Maps the core service and repository errors to HTTP status codes and a
//! JSON response body. Internal errors are logged with their detail and
//! returned to the client with a generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use guesthouse_core::{SliderRepositoryError, SliderServiceError};
use serde::Serialize;
use thiserror::Error;

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Bad request (invalid input).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Conflict (the mutation lost a race; reload and retry).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    status: u16,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            HttpError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            HttpError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            HttpError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            HttpError::Internal(msg) => {
                // No partial application exists behind any of these: the
                // transaction already rolled back. Keep the detail server-side.
                tracing::error!(target: "guesthouse.http", error = %msg, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
        };

        let body = ErrorBody {
            error: message,
            status: status.as_u16(),
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<SliderRepositoryError> for HttpError {
    fn from(err: SliderRepositoryError) -> Self {
        match err {
            SliderRepositoryError::NotFound(msg) => HttpError::NotFound(msg),
            SliderRepositoryError::Conflict(msg) => HttpError::Conflict(msg),
            SliderRepositoryError::Internal(msg) => HttpError::Internal(msg),
        }
    }
}

impl From<SliderServiceError> for HttpError {
    fn from(err: SliderServiceError) -> Self {
        match err {
            SliderServiceError::Validation(msg) => HttpError::BadRequest(msg),
            SliderServiceError::Repository(repo_err) => repo_err.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_map_to_bad_request() {
        let err: HttpError = SliderServiceError::Validation("ids must be unique".into()).into();
        assert!(matches!(err, HttpError::BadRequest(_)));
    }

    #[test]
    fn repository_conflicts_map_to_conflict() {
        let err: HttpError =
            SliderServiceError::from(SliderRepositoryError::Conflict("raced".into())).into();
        assert!(matches!(err, HttpError::Conflict(_)));
    }

    #[test]
    fn internal_detail_is_not_exposed() {
        let response = HttpError::Internal("UNIQUE constraint failed: sliders.position".into())
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
