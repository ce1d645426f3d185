//! # Error Handling Middleware
//!
//! Maps the domain error taxonomy to HTTP status codes and JSON error
//! responses, so a double-booking surfaces as a 409 the caller can act on
//! rather than a generic 500.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fieldsync_core::errors::DispatchError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping.
///
/// `AppError` wraps domain-specific `DispatchError` instances and
/// implements `IntoResponse` to convert them into HTTP responses with
/// appropriate status codes and JSON payloads.
#[derive(Debug)]
pub struct AppError(pub DispatchError);

/// Converts application errors to HTTP responses.
///
/// Each scheduling-gate failure keeps a distinct status code so calling
/// UIs can distinguish "pick another technician" (409) from "fix the
/// request" (400/422).
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map error types to HTTP status codes
        let status = status_for(&self.0);

        // Get the error message and format as JSON
        let message = self.0.to_string();
        let body = Json(json!({ "error": message }));

        // Combine status code and JSON body into a response
        (status, body).into_response()
    }
}

/// Allows using the `?` operator with functions returning
/// `Result<T, DispatchError>` inside handlers returning
/// `Result<T, AppError>`.
impl From<DispatchError> for AppError {
    fn from(err: DispatchError) -> Self {
        AppError(err)
    }
}

/// Wraps repository-level `eyre::Report` failures as database errors.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(DispatchError::Database(err))
    }
}

/// Exposes the mapped status code for a domain error; used by tests and
/// by call sites that build responses manually.
pub fn status_for(err: &DispatchError) -> StatusCode {
    match err {
        DispatchError::MissingField(_)
        | DispatchError::Validation(_)
        | DispatchError::InvalidTimeFormat(_)
        | DispatchError::PastDate(_) => StatusCode::BAD_REQUEST,
        DispatchError::NotFound(_) => StatusCode::NOT_FOUND,
        DispatchError::DoubleBooked => StatusCode::CONFLICT,
        DispatchError::Inactive(_) | DispatchError::OutsideWorkingHours { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        DispatchError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
