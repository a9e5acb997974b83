//! Resolution of the employee a request acts for.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::models::EmployeeId;

use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Header carrying the acting employee's identifier.
pub const EMPLOYEE_ID_HEADER: &str = "x-employee-id";

/// The employee a request acts for.
///
/// Read from the `x-employee-id` header; requests without the header act
/// for the configured session default. A header that is not a number is
/// rejected with `INVALID_IDENTITY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentEmployee(pub EmployeeId);

#[async_trait]
impl FromRequestParts<AppState> for CurrentEmployee {
    type Rejection = ApiErrorResponse;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(EMPLOYEE_ID_HEADER) else {
            return Ok(CurrentEmployee(state.default_employee_id()));
        };

        let raw = String::from_utf8_lossy(value.as_bytes());
        raw.trim()
            .parse::<EmployeeId>()
            .map(CurrentEmployee)
            .map_err(|_| ApiErrorResponse::bad_request(ApiError::invalid_identity(raw.to_string())))
    }
}
