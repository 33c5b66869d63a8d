//! Uniform response envelope returned by every region endpoint.

use axum::Json;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use refhub_domain::error::RefHubError;

/// Either a success payload or an error description.
///
/// Always serialized with HTTP 200; callers inspect `isSuccess` and, on
/// failure, `errorKind` (`validation`, `not_found`, `storage`, or `fault`
/// for a panicking handler).
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResult<T> {
    pub is_success: bool,
    pub message: Option<String>,
    pub error_kind: Option<String>,
    pub data: Option<T>,
}

impl<T> ServiceResult<T> {
    /// Success wrapping `data`.
    pub fn success(data: T) -> Self {
        Self {
            is_success: true,
            message: None,
            error_kind: None,
            data: Some(data),
        }
    }

    /// Success without payload.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            is_success: true,
            message: None,
            error_kind: None,
            data: None,
        }
    }

    /// Error envelope for `err`, logged under `logger_prefix`.
    #[must_use]
    pub fn failure(logger_prefix: &str, err: &RefHubError) -> Self {
        match err {
            RefHubError::Storage(source) => {
                tracing::error!(operation = logger_prefix, error = %source, "storage error");
            }
            RefHubError::Validation(_) | RefHubError::NotFound(_) => {
                tracing::warn!(operation = logger_prefix, error = %err, "request failed");
            }
        }

        Self {
            is_success: false,
            message: Some(format!("{logger_prefix}: {err}")),
            error_kind: Some(err.kind().to_string()),
            data: None,
        }
    }

    /// Wrap the outcome of an operation.
    pub fn from_result(logger_prefix: &str, result: Result<T, RefHubError>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(err) => Self::failure(logger_prefix, &err),
        }
    }
}

impl ServiceResult<()> {
    /// Wrap an operation that returns no payload.
    pub fn from_unit(logger_prefix: &str, result: Result<(), RefHubError>) -> Self {
        match result {
            Ok(()) => Self::empty(),
            Err(err) => Self::failure(logger_prefix, &err),
        }
    }
}

impl<T: Serialize> IntoResponse for ServiceResult<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
