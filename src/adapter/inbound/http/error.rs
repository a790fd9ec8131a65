//! Mapping from crate errors to HTTP responses.
//!
//! | Error                      | Status | Code               |
//! |----------------------------|--------|--------------------|
//! | `NotFound`                 | 404    | `NOT_FOUND`        |
//! | `ConcurrentModification`   | 409    | `VERSION_CONFLICT` |
//! | `Domain(_)`                | 400    | `VALIDATION_ERROR` |
//! | anything else              | 500    | `INTERNAL_ERROR`   |
//!
//! Internal failures are logged in full and answered with a generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::error::DomainError;
use crate::error::Error;

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// An [`Error`] on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError(Error);

impl ApiError {
    /// Status code, machine-readable code and client-facing message.
    #[must_use]
    pub fn parts(&self) -> (StatusCode, &'static str, String) {
        match &self.0 {
            Error::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND", self.0.to_string()),
            Error::ConcurrentModification { .. } => (
                StatusCode::CONFLICT,
                "VERSION_CONFLICT",
                format!("Update conflict: {}", self.0),
            ),
            Error::VersionConflict { entity, .. } => (
                StatusCode::CONFLICT,
                "VERSION_CONFLICT",
                format!(
                    "Update conflict: {}",
                    Error::ConcurrentModification { entity: *entity }
                ),
            ),
            Error::Domain(e) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string()),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An error occurred".to_string(),
            ),
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(Error::Domain(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        }
        (
            status,
            Json(ErrorResponse {
                error: message,
                code: code.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::EntityKind;

    #[test]
    fn not_found_is_404_with_message() {
        let (status, code, message) =
            ApiError::from(Error::not_found(EntityKind::Product, 1_i64)).parts();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(code, "NOT_FOUND");
        assert_eq!(message, "Product not found with id 1");
    }

    #[test]
    fn concurrent_modification_is_409() {
        let (status, _, message) = ApiError::from(Error::ConcurrentModification {
            entity: EntityKind::Product,
        })
        .parts();
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(
            message,
            "Update conflict: Product was updated by another transaction."
        );
    }

    #[test]
    fn validation_is_400() {
        let (status, code, _) = ApiError::from(DomainError::ZeroPageSize).parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "VALIDATION_ERROR");
    }

    #[test]
    fn internal_errors_hide_details() {
        let (status, _, message) =
            ApiError::from(Error::Database("disk I/O error".to_string())).parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "An error occurred");
    }
}
