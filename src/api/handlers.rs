//! HTTP request handlers for the Leave Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::LeaveError;
use crate::service::LeaveRequestInput;

use super::identity::CurrentEmployee;
use super::request::{DateRangeQuery, UpdateStatusRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/employees/current", get(current_employee_handler))
        .route("/employees/timesheet", get(timesheet_handler))
        .route("/holidays", get(holidays_handler))
        .route("/leave-policies", get(leave_policies_handler))
        .route(
            "/leave-requests",
            get(leave_requests_handler).post(create_leave_request_handler),
        )
        .route("/leave-requests/status", post(update_status_handler))
        .route("/leave-requests/dashboard", get(dashboard_handler))
        .with_state(state)
}

/// Handler for GET /employees/current.
///
/// Returns the acting employee with their entitlement for the current year.
async fn current_employee_handler(
    State(state): State<AppState>,
    CurrentEmployee(employee_id): CurrentEmployee,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id, "Fetching current employee");

    let start_time = Instant::now();
    match state.service().current_employee(employee_id).await {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                employee_id,
                policies_count = result.entitlement.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Current employee resolved"
            );
            json_response(StatusCode::OK, &result)
        }
        Err(err) => failure(correlation_id, "current_employee", err),
    }
}

/// Handler for GET /employees/timesheet?start_date&end_date.
async fn timesheet_handler(
    State(state): State<AppState>,
    query: Result<Query<DateRangeQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing timesheet request");

    let range = match query {
        Ok(Query(range)) => range,
        Err(rejection) => return query_rejection(correlation_id, rejection).into_response(),
    };

    let start_time = Instant::now();
    match state
        .service()
        .timesheet(range.start_date, range.end_date)
        .await
    {
        Ok(timesheets) => {
            info!(
                correlation_id = %correlation_id,
                start_date = %range.start_date,
                end_date = %range.end_date,
                employees_count = timesheets.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Timesheet classified"
            );
            json_response(StatusCode::OK, &timesheets)
        }
        Err(err) => failure(correlation_id, "timesheet", err),
    }
}

/// Handler for GET /holidays?start_date&end_date.
async fn holidays_handler(
    State(state): State<AppState>,
    query: Result<Query<DateRangeQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let range = match query {
        Ok(Query(range)) => range,
        Err(rejection) => return query_rejection(correlation_id, rejection).into_response(),
    };

    match state
        .service()
        .holidays_in_range(range.start_date, range.end_date)
        .await
    {
        Ok(holidays) => {
            info!(
                correlation_id = %correlation_id,
                holidays_count = holidays.len(),
                "Holidays listed"
            );
            json_response(StatusCode::OK, &holidays)
        }
        Err(err) => failure(correlation_id, "holidays_in_range", err),
    }
}

/// Handler for GET /leave-policies.
async fn leave_policies_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();

    match state.service().leave_policies().await {
        Ok(policies) => {
            info!(
                correlation_id = %correlation_id,
                policies_count = policies.len(),
                "Leave policies listed"
            );
            json_response(StatusCode::OK, &policies)
        }
        Err(err) => failure(correlation_id, "leave_policies", err),
    }
}

/// Handler for GET /leave-requests.
async fn leave_requests_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();

    let start_time = Instant::now();
    match state.service().leave_requests().await {
        Ok(requests) => {
            info!(
                correlation_id = %correlation_id,
                requests_count = requests.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Leave requests listed"
            );
            json_response(StatusCode::OK, &requests)
        }
        Err(err) => failure(correlation_id, "leave_requests", err),
    }
}

/// Handler for POST /leave-requests.
///
/// Validates the submission for the acting employee and stores it as
/// pending. Responds 201 with the stored request.
async fn create_leave_request_handler(
    State(state): State<AppState>,
    CurrentEmployee(employee_id): CurrentEmployee,
    payload: Result<Json<LeaveRequestInput>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id, "Processing leave request submission");

    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => return json_rejection(correlation_id, rejection).into_response(),
    };

    let start_time = Instant::now();
    match state
        .service()
        .create_leave_request(employee_id, input)
        .await
    {
        Ok(request) => {
            info!(
                correlation_id = %correlation_id,
                employee_id,
                leave_request_id = request.id,
                leave_policy_id = request.leave_policy_id,
                duration_us = start_time.elapsed().as_micros(),
                "Leave request created"
            );
            json_response(StatusCode::CREATED, &request)
        }
        Err(err) => failure(correlation_id, "create_leave_request", err),
    }
}

/// Handler for POST /leave-requests/status.
async fn update_status_handler(
    State(state): State<AppState>,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let update = match payload {
        Ok(Json(update)) => update,
        Err(rejection) => return json_rejection(correlation_id, rejection).into_response(),
    };

    match state.service().update_status(update.id, update.status).await {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                leave_request_id = update.id,
                status = %result.status,
                "Leave request status updated"
            );
            json_response(StatusCode::OK, &result)
        }
        Err(err) => failure(correlation_id, "update_status", err),
    }
}

/// Handler for GET /leave-requests/dashboard.
async fn dashboard_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();

    let start_time = Instant::now();
    match state.service().dashboard_leave_requests().await {
        Ok(requests) => {
            info!(
                correlation_id = %correlation_id,
                requests_count = requests.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Dashboard computed"
            );
            json_response(StatusCode::OK, &requests)
        }
        Err(err) => failure(correlation_id, "dashboard_leave_requests", err),
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn failure(correlation_id: Uuid, operation: &'static str, err: LeaveError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        operation,
        error = %err,
        "Operation failed"
    );
    ApiErrorResponse::from(err).into_response()
}

/// Maps a rejected JSON body to a 400 response.
fn json_rejection(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") || body_text.contains("unknown variant") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error)
}

/// Maps a rejected query string to a 400 response.
fn query_rejection(correlation_id: Uuid, rejection: QueryRejection) -> ApiErrorResponse {
    let body_text = rejection.body_text();
    warn!(
        correlation_id = %correlation_id,
        error = %body_text,
        "Query string error"
    );
    ApiErrorResponse::bad_request(ApiError::validation_error(body_text))
}
