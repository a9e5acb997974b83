//! Source of "today" for the Leave Engine.
//!
//! Operations that depend on the current date (the current year's
//! entitlement, the dashboard) take their date from an injected [`Clock`],
//! which lets tests and demo deployments pin the date.

use chrono::{NaiveDate, Utc};

/// Provides the current calendar date.
pub trait Clock: Send + Sync {
    /// Returns today's date.
    fn today(&self) -> NaiveDate;
}

/// A clock backed by the system time, in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// A clock that always returns the same date.
///
/// # Example
///
/// ```
/// use leave_engine::clock::{Clock, FixedClock};
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// assert_eq!(FixedClock(date).today(), date);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
