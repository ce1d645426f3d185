use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::NaiveDate;
use fieldsync_core::errors::DispatchError;
use fieldsync_core::models::time_window::TimeWindow;

use fieldsync_api::middleware::error_handling::{status_for, AppError};

#[test]
fn test_missing_field_maps_to_bad_request() {
    let error = DispatchError::MissingField("technician_id".to_string());
    assert_eq!(status_for(&error), StatusCode::BAD_REQUEST);
}

#[test]
fn test_validation_maps_to_bad_request() {
    let error = DispatchError::Validation("Invalid input".to_string());
    assert_eq!(status_for(&error), StatusCode::BAD_REQUEST);
}

#[test]
fn test_invalid_time_format_maps_to_bad_request() {
    let error = DispatchError::InvalidTimeFormat("25:99".to_string());
    assert_eq!(status_for(&error), StatusCode::BAD_REQUEST);
}

#[test]
fn test_past_date_maps_to_bad_request() {
    let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let error = DispatchError::PastDate(date);
    assert_eq!(status_for(&error), StatusCode::BAD_REQUEST);
}

#[test]
fn test_not_found_maps_to_not_found() {
    let error = DispatchError::NotFound("Technician abc".to_string());
    assert_eq!(status_for(&error), StatusCode::NOT_FOUND);
}

#[test]
fn test_double_booked_maps_to_conflict() {
    assert_eq!(status_for(&DispatchError::DoubleBooked), StatusCode::CONFLICT);
}

#[test]
fn test_inactive_maps_to_unprocessable() {
    let error = DispatchError::Inactive("Technician Dana".to_string());
    assert_eq!(status_for(&error), StatusCode::UNPROCESSABLE_ENTITY);
}

#[test]
fn test_outside_working_hours_maps_to_unprocessable() {
    let error = DispatchError::OutsideWorkingHours {
        working: TimeWindow { start: 540, end: 1020 },
        slot: TimeWindow { start: 480, end: 600 },
    };
    assert_eq!(status_for(&error), StatusCode::UNPROCESSABLE_ENTITY);
}

#[test]
fn test_database_maps_to_internal_error() {
    let error = DispatchError::Database(eyre::eyre!("connection reset"));
    assert_eq!(status_for(&error), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_response_carries_mapped_status() {
    // The full IntoResponse path uses the same mapping as status_for
    let response = AppError(DispatchError::DoubleBooked).into_response();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_response_body_is_json_error_object() {
    let response = AppError(DispatchError::NotFound("Job 123".to_string())).into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let payload: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(payload["error"], "Resource not found: Job 123");
}

#[test]
fn test_eyre_report_wraps_as_database_error() {
    let err: AppError = eyre::eyre!("pool timed out").into();
    assert_eq!(status_for(&err.0), StatusCode::INTERNAL_SERVER_ERROR);
}
