//! Error-to-HTTP response conversion.
//!
//! Implements `IntoResponse` for [`fd_core::Error`] so that route handlers
//! can return `Result<T, AppError>` and use `?` on core results.

use axum::body::Body;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Wrapper so we can implement `IntoResponse` for an external type.
#[derive(Debug)]
pub struct AppError(pub fd_core::Error);

impl From<fd_core::Error> for AppError {
    fn from(e: fd_core::Error) -> Self {
        Self(e)
    }
}

impl From<fd_flp::FlpError> for AppError {
    fn from(e: fd_flp::FlpError) -> Self {
        Self(e.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // 416 carries no body, only the size the client should have used.
        if let fd_core::Error::RangeNotSatisfiable { size } = self.0 {
            return (
                status,
                [
                    (header::CONTENT_RANGE, format!("bytes */{size}")),
                    (header::ACCEPT_RANGES, "bytes".to_string()),
                ],
                Body::empty(),
            )
                .into_response();
        }

        if status.is_server_error() {
            tracing::error!(
                status = %status,
                error = %self.0,
                "Server error in API handler"
            );
        }

        let code = match &self.0 {
            fd_core::Error::NotFound { .. } => "not_found",
            fd_core::Error::Validation(_) => "validation_error",
            fd_core::Error::Conflict(_) => "conflict",
            fd_core::Error::RangeNotSatisfiable { .. } => "range_not_satisfiable",
            fd_core::Error::InvalidFormat(_) => "invalid_format",
            fd_core::Error::Io { .. } => "io_error",
            fd_core::Error::Internal(_) => "internal_error",
        };

        let body = json!({
            "error": self.0.to_string(),
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
