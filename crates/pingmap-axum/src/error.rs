//! Axum-specific error types and mappings.
//!
//! Maps `CoreError` and upstream client failures to HTTP status codes and a
//! JSON response body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pingmap_core::CoreError;
use serde::Serialize;
use thiserror::Error;

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request (invalid input).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Service unavailable (e.g., upstream API down or not configured).
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
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
        let (status, message) = match &self {
            HttpError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            HttpError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            HttpError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            HttpError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = ErrorBody {
            error: message,
            status: status.as_u16(),
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<CoreError> for HttpError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Topology(topology_err) => HttpError::Internal(topology_err.to_string()),
            CoreError::Settings(settings_err) => HttpError::BadRequest(settings_err.to_string()),
            CoreError::Configuration(msg) => HttpError::Internal(format!("Config: {msg}")),
            CoreError::ExternalService(msg) => HttpError::ServiceUnavailable(msg),
            CoreError::Internal(msg) => HttpError::Internal(msg),
        }
    }
}

impl From<reqwest::Error> for HttpError {
    fn from(err: reqwest::Error) -> Self {
        HttpError::ServiceUnavailable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let response = HttpError::NotFound("missing".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = HttpError::ServiceUnavailable("down".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_core_error_mapping() {
        let err = HttpError::from(CoreError::ExternalService("upstream".to_string()));
        assert!(matches!(err, HttpError::ServiceUnavailable(_)));
    }
}
