//! HTTP API module for the Leave Engine.
//!
//! This module provides the REST API endpoints for timesheets, holidays,
//! leave policies and the leave request workflow.

mod handlers;
mod identity;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use identity::{CurrentEmployee, EMPLOYEE_ID_HEADER};
pub use request::{DateRangeQuery, UpdateStatusRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
