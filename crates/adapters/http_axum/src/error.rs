//! Failures that happen around the handlers rather than inside the service:
//! undecodable request bodies and panics.

use std::any::Any;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use refhub_domain::error::{RefHubError, ValidationError};

use crate::envelope::ServiceResult;

/// Turn a JSON body rejection into a validation error so that it ends up in
/// an error envelope like any other failure.
#[must_use]
pub fn malformed(rejection: JsonRejection) -> RefHubError {
    ValidationError::MalformedRequest(rejection.body_text()).into()
}

/// Response for a handler that panicked.
///
/// Still an HTTP 200 error envelope; `errorKind` is `fault` so callers can
/// tell it apart from request errors.
#[allow(clippy::needless_pass_by_value)]
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = detail, "handler panicked");

    let body: ServiceResult<()> = ServiceResult {
        is_success: false,
        message: Some("internal server error".to_string()),
        error_kind: Some("fault".to_string()),
        data: None,
    };
    (StatusCode::OK, Json(body)).into_response()
}
