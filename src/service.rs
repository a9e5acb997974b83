//! Leave operations over a store and a clock.
//!
//! [`LeaveService`] implements every operation the API exposes: entitlement
//! and timesheet views, holiday and request listings, leave submission with
//! its validation rules, and status transitions. The current employee is
//! always passed in explicitly.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calculation::{
    DayClassification, EmployeeEntitlements, LeaveSpan, check_capacity, classify_days,
    count_working_days, tally_entitlements, working_days_by_year, year_bounds,
};
use crate::clock::Clock;
use crate::error::{LeaveError, LeaveResult};
use crate::models::{
    Employee, EmployeeId, Holiday, LeavePolicy, LeavePolicyId, LeaveRequest, LeaveRequestId,
    LeaveStatus, NewLeaveRequest,
};
use crate::store::{LeaveRequestFilter, LeaveStore};

/// A leave submission from the current employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequestInput {
    /// The policy to take leave under.
    pub leave_policy_id: LeavePolicyId,
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
}

/// One employee's classified days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeTimesheet {
    /// The employee.
    pub employee: Employee,
    /// One classification per day of the requested range.
    pub dates: Vec<DayClassification>,
}

/// A leave request with its employee, policy and working-day count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequestDetails {
    /// The stored request.
    #[serde(flatten)]
    pub request: LeaveRequest,
    /// The requesting employee.
    pub employee: Employee,
    /// The policy the leave is taken under.
    pub leave_policy: LeavePolicy,
    /// Working days (neither weekend nor holiday) within the request.
    pub count_working_days: u32,
}

/// A pending or approved leave request with the days it takes this year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardLeaveRequest {
    /// The stored request.
    #[serde(flatten)]
    pub request: LeaveRequest,
    /// The requesting employee.
    pub employee: Employee,
    /// The policy the leave is taken under.
    pub leave_policy: LeavePolicy,
    /// Days of the request, in the current year, attributed to its policy.
    pub total_days_taken: u32,
}

/// Outcome of a status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    /// Always true; failures are reported as errors.
    pub success: bool,
    /// The status the request now has.
    pub status: LeaveStatus,
}

/// Implements the leave operations on top of a [`LeaveStore`] and a [`Clock`].
#[derive(Clone)]
pub struct LeaveService {
    store: Arc<dyn LeaveStore>,
    clock: Arc<dyn Clock>,
}

impl LeaveService {
    /// Creates a service over the given store and clock.
    pub fn new(store: Arc<dyn LeaveStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Returns the date the service considers today.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Returns the current employee's details and entitlement for the
    /// current year.
    pub async fn current_employee(
        &self,
        employee_id: EmployeeId,
    ) -> LeaveResult<EmployeeEntitlements> {
        self.entitlements(employee_id, self.today().year()).await
    }

    /// Computes an employee's entitlement for every leave policy in `year`.
    ///
    /// Days count as taken when they fall under a pending or approved
    /// request; holidays of the year never count.
    ///
    /// # Errors
    ///
    /// - [`LeaveError::EmployeeNotFound`] if the employee does not exist
    /// - [`LeaveError::InvalidYear`] if the year has no date representation
    pub async fn entitlements(
        &self,
        employee_id: EmployeeId,
        year: i32,
    ) -> LeaveResult<EmployeeEntitlements> {
        let (start, end) = year_bounds(year).ok_or(LeaveError::InvalidYear { year })?;

        let employee = self
            .store
            .employee(employee_id)
            .await?
            .ok_or(LeaveError::EmployeeNotFound { id: employee_id })?;

        let filter = LeaveRequestFilter::default()
            .employee(employee_id)
            .overlapping(start, end)
            .counting_as_taken();
        let requests = self.store.leave_requests(&filter).await?;

        let policies = self.store.leave_policies().await?;
        let spans = resolve_spans(&requests, &policies)?;
        let holidays = self.store.holidays_in_range(start, end).await?;

        let days = classify_days(start, end, &spans, &holidays);

        Ok(EmployeeEntitlements {
            details: employee,
            entitlement: tally_entitlements(&policies, &days),
        })
    }

    /// Classifies `[start, end]` for every employee, using approved leave.
    ///
    /// # Errors
    ///
    /// [`LeaveError::InvalidRange`] if `end` precedes `start`.
    pub async fn timesheet(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> LeaveResult<Vec<EmployeeTimesheet>> {
        ensure_range(start, end)?;

        let employees = self.store.employees().await?;
        let policies = self.store.leave_policies().await?;
        let holidays = self.store.holidays_in_range(start, end).await?;

        let filter = LeaveRequestFilter::default()
            .overlapping(start, end)
            .statuses(&[LeaveStatus::Approved]);
        let mut by_employee: HashMap<EmployeeId, Vec<LeaveRequest>> = HashMap::new();
        for request in self.store.leave_requests(&filter).await? {
            by_employee.entry(request.employee_id).or_default().push(request);
        }

        employees
            .into_iter()
            .map(|employee| {
                let requests = by_employee.remove(&employee.id).unwrap_or_default();
                let spans = resolve_spans(&requests, &policies)?;
                Ok(EmployeeTimesheet {
                    dates: classify_days(start, end, &spans, &holidays),
                    employee,
                })
            })
            .collect()
    }

    /// Lists the holidays within `[start, end]`.
    ///
    /// # Errors
    ///
    /// [`LeaveError::InvalidRange`] if `end` precedes `start`.
    pub async fn holidays_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> LeaveResult<Vec<Holiday>> {
        ensure_range(start, end)?;
        self.store.holidays_in_range(start, end).await
    }

    /// Lists every leave policy.
    pub async fn leave_policies(&self) -> LeaveResult<Vec<LeavePolicy>> {
        self.store.leave_policies().await
    }

    /// Lists every leave request with its employee, policy and working days.
    pub async fn leave_requests(&self) -> LeaveResult<Vec<LeaveRequestDetails>> {
        let requests = self.store.leave_requests(&LeaveRequestFilter::default()).await?;
        let mut details = Vec::with_capacity(requests.len());

        for request in requests {
            let (employee, leave_policy) = self.resolve_parties(&request).await?;
            let days = self
                .classify_without_leave(request.start_date, request.end_date)
                .await?;
            let count_working_days = count_working_days(&days);

            details.push(LeaveRequestDetails {
                request,
                employee,
                leave_policy,
                count_working_days,
            });
        }

        Ok(details)
    }

    /// Validates and stores a leave request for the current employee.
    ///
    /// Rules, checked in order:
    /// 1. `end_date >= start_date`
    /// 2. the leave policy exists
    /// 3. the employee exists
    /// 4. all working days of the request fit into the start year's
    ///    remaining allowance of the policy
    /// 5. when the request spans years, each year's working days also fit
    ///    into that year's remaining allowance
    ///
    /// Nothing is stored when a rule fails.
    ///
    /// # Errors
    ///
    /// - [`LeaveError::InvalidRange`] if the end date precedes the start date
    /// - [`LeaveError::LeavePolicyNotFound`] if the policy does not exist
    /// - [`LeaveError::EmployeeNotFound`] if the employee does not exist
    /// - [`LeaveError::LimitExceeded`] if a year's allowance is insufficient
    pub async fn create_leave_request(
        &self,
        employee_id: EmployeeId,
        input: LeaveRequestInput,
    ) -> LeaveResult<LeaveRequest> {
        let LeaveRequestInput {
            leave_policy_id,
            start_date,
            end_date,
        } = input;

        ensure_range(start_date, end_date)?;

        let policy = self
            .store
            .leave_policy(leave_policy_id)
            .await?
            .ok_or(LeaveError::LeavePolicyNotFound { id: leave_policy_id })?;

        let days = self.classify_without_leave(start_date, end_date).await?;
        let start_year = start_date.year();
        let spans_years = start_year != end_date.year();

        // The whole request is charged against the start year first.
        let start_entitlements = self.entitlements(employee_id, start_year).await?;
        check_capacity(
            start_entitlements.for_policy(policy.id),
            &policy.title,
            count_working_days(&days),
            spans_years.then_some(start_year),
        )?;

        // Each later year is checked against its own share.
        if spans_years {
            for (year, requested) in working_days_by_year(&days) {
                if year == start_year {
                    continue;
                }
                let entitlements = self.entitlements(employee_id, year).await?;
                check_capacity(
                    entitlements.for_policy(policy.id),
                    &policy.title,
                    requested,
                    Some(year),
                )?;
            }
        }

        self.store
            .insert_leave_request(NewLeaveRequest {
                employee_id,
                leave_policy_id: policy.id,
                start_date,
                end_date,
            })
            .await
    }

    /// Approves or rejects a pending leave request.
    ///
    /// The entitlement is not re-checked on approval.
    ///
    /// # Errors
    ///
    /// - [`LeaveError::LeaveRequestNotFound`] if the request does not exist
    /// - [`LeaveError::InvalidStatusTransition`] if the request is no longer
    ///   pending or `status` is `pending`
    pub async fn update_status(
        &self,
        id: LeaveRequestId,
        status: LeaveStatus,
    ) -> LeaveResult<StatusUpdate> {
        let request = self
            .store
            .leave_request(id)
            .await?
            .ok_or(LeaveError::LeaveRequestNotFound { id })?;

        if !request.status.can_transition_to(status) {
            return Err(LeaveError::InvalidStatusTransition {
                id,
                from: request.status,
                to: status,
            });
        }

        self.store
            .set_leave_request_status(id, status)
            .await?
            .ok_or(LeaveError::LeaveRequestNotFound { id })?;

        Ok(StatusUpdate {
            success: true,
            status,
        })
    }

    /// Lists pending and approved requests with the days each takes in the
    /// current year.
    ///
    /// Each employee's year is classified over all of that employee's
    /// pending and approved requests, so a day contested by two requests is
    /// attributed to the winning policy only.
    pub async fn dashboard_leave_requests(&self) -> LeaveResult<Vec<DashboardLeaveRequest>> {
        let year = self.today().year();
        let (start, end) = year_bounds(year).ok_or(LeaveError::InvalidYear { year })?;

        let filter = LeaveRequestFilter::default().counting_as_taken();
        let requests = self.store.leave_requests(&filter).await?;
        let policies = self.store.leave_policies().await?;
        let holidays = self.store.holidays_in_range(start, end).await?;

        let mut by_employee: BTreeMap<EmployeeId, Vec<&LeaveRequest>> = BTreeMap::new();
        for request in &requests {
            by_employee.entry(request.employee_id).or_default().push(request);
        }

        let mut days_by_employee: HashMap<EmployeeId, Vec<DayClassification>> = HashMap::new();
        for (employee_id, employee_requests) in by_employee {
            let in_year: Vec<LeaveRequest> = employee_requests
                .into_iter()
                .filter(|r| r.overlaps(start, end))
                .cloned()
                .collect();
            let spans = resolve_spans(&in_year, &policies)?;
            days_by_employee.insert(employee_id, classify_days(start, end, &spans, &holidays));
        }

        let mut results = Vec::with_capacity(requests.len());
        for request in requests {
            let (employee, leave_policy) = self.resolve_parties(&request).await?;
            let total_days_taken = days_by_employee
                .get(&request.employee_id)
                .map(|days| {
                    days.iter()
                        .filter(|day| request.contains_date(day.date()))
                        .filter(|day| {
                            day.leave_policy()
                                .is_some_and(|lp| lp.id == request.leave_policy_id)
                        })
                        .count() as u32
                })
                .unwrap_or(0);

            results.push(DashboardLeaveRequest {
                request,
                employee,
                leave_policy,
                total_days_taken,
            });
        }

        Ok(results)
    }

    /// Classifies `[start, end]` against its holidays only.
    async fn classify_without_leave(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> LeaveResult<Vec<DayClassification>> {
        let holidays = self.store.holidays_in_range(start, end).await?;
        Ok(classify_days(start, end, &[], &holidays))
    }

    /// Loads the employee and policy a request refers to.
    async fn resolve_parties(
        &self,
        request: &LeaveRequest,
    ) -> LeaveResult<(Employee, LeavePolicy)> {
        let employee = self
            .store
            .employee(request.employee_id)
            .await?
            .ok_or(LeaveError::EmployeeNotFound {
                id: request.employee_id,
            })?;
        let policy = self
            .store
            .leave_policy(request.leave_policy_id)
            .await?
            .ok_or(LeaveError::LeavePolicyNotFound {
                id: request.leave_policy_id,
            })?;
        Ok((employee, policy))
    }
}

fn ensure_range(start_date: NaiveDate, end_date: NaiveDate) -> LeaveResult<()> {
    if end_date < start_date {
        return Err(LeaveError::InvalidRange {
            start_date,
            end_date,
        });
    }
    Ok(())
}

/// Pairs each request with its policy for classification.
fn resolve_spans(
    requests: &[LeaveRequest],
    policies: &[LeavePolicy],
) -> LeaveResult<Vec<LeaveSpan>> {
    requests
        .iter()
        .map(|request| {
            let policy = policies
                .iter()
                .find(|p| p.id == request.leave_policy_id)
                .ok_or(LeaveError::LeavePolicyNotFound {
                    id: request.leave_policy_id,
                })?;
            Ok(LeaveSpan {
                start_date: request.start_date,
                end_date: request.end_date,
                policy: policy.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::store::InMemoryStore;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn employee(id: EmployeeId, first_name: &str) -> Employee {
        Employee {
            id,
            first_name: first_name.to_string(),
            last_name: "Lothbrok".to_string(),
            email: format!("{}@example.com", first_name.to_lowercase()),
            is_admin: id == 1,
        }
    }

    fn policies() -> Vec<LeavePolicy> {
        vec![
            LeavePolicy {
                id: 1,
                title: "Annual Leave".to_string(),
                is_unlimited: false,
                allowed_days_per_year: Some(15),
            },
            LeavePolicy {
                id: 2,
                title: "Sick Leave".to_string(),
                is_unlimited: false,
                allowed_days_per_year: Some(15),
            },
            LeavePolicy {
                id: 3,
                title: "Remote Work".to_string(),
                is_unlimited: true,
                allowed_days_per_year: None,
            },
        ]
    }

    fn holidays() -> Vec<Holiday> {
        vec![
            Holiday {
                id: 1,
                name: "New Year's Day".to_string(),
                date: make_date("2025-01-01"),
            },
            Holiday {
                id: 2,
                name: "Christmas Day".to_string(),
                date: make_date("2024-12-25"),
            },
        ]
    }

    fn create_service() -> (LeaveService, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::new(
            vec![employee(1, "Ragnar"), employee(2, "Bjorn")],
            policies(),
            holidays(),
        ));
        let clock = Arc::new(FixedClock(make_date("2024-03-01")));
        (LeaveService::new(store.clone(), clock), store)
    }

    fn input(policy_id: LeavePolicyId, start: &str, end: &str) -> LeaveRequestInput {
        LeaveRequestInput {
            leave_policy_id: policy_id,
            start_date: make_date(start),
            end_date: make_date(end),
        }
    }

    /// Stores an approved request directly, bypassing validation.
    async fn seed_approved(
        store: &InMemoryStore,
        employee_id: EmployeeId,
        policy_id: LeavePolicyId,
        start: &str,
        end: &str,
    ) {
        let request = store
            .insert_leave_request(NewLeaveRequest {
                employee_id,
                leave_policy_id: policy_id,
                start_date: make_date(start),
                end_date: make_date(end),
            })
            .await
            .unwrap();
        store
            .set_leave_request_status(request.id, LeaveStatus::Approved)
            .await
            .unwrap();
    }

    // ==========================================================================
    // SV-001: Sick leave Mon-Fri with nothing taken succeeds
    // ==========================================================================
    #[tokio::test]
    async fn test_sv_001_five_weekdays_within_allowance() {
        let (service, _) = create_service();

        let created = service
            .create_leave_request(1, input(2, "2024-03-04", "2024-03-08"))
            .await
            .unwrap();
        assert_eq!(created.status, LeaveStatus::Pending);
        assert_eq!(created.leave_policy_id, 2);

        let listed = service.leave_requests().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].count_working_days, 5);
        assert_eq!(listed[0].leave_policy.title, "Sick Leave");
    }

    // ==========================================================================
    // SV-002: 12 taken + 5 requested exceeds 15
    // ==========================================================================
    #[tokio::test]
    async fn test_sv_002_exceeding_allowance_fails() {
        let (service, store) = create_service();
        // 12 weekdays: Mon 2024-02-05 through Tue 2024-02-20
        seed_approved(&store, 1, 2, "2024-02-05", "2024-02-09").await;
        seed_approved(&store, 1, 2, "2024-02-12", "2024-02-16").await;
        seed_approved(&store, 1, 2, "2024-02-19", "2024-02-20").await;

        let taken = service.entitlements(1, 2024).await.unwrap();
        assert_eq!(taken.for_policy(2).unwrap().already_taken, 12);

        let result = service
            .create_leave_request(1, input(2, "2024-03-04", "2024-03-08"))
            .await;
        assert!(matches!(
            result,
            Err(LeaveError::LimitExceeded {
                requested: 5,
                remaining: 3,
                year: None,
                ..
            })
        ));
        assert_eq!(service.leave_requests().await.unwrap().len(), 3);
    }

    // ==========================================================================
    // SV-003: End before start is rejected
    // ==========================================================================
    #[tokio::test]
    async fn test_sv_003_reversed_range_rejected() {
        let (service, _) = create_service();
        let result = service
            .create_leave_request(1, input(1, "2024-03-08", "2024-03-04"))
            .await;
        assert!(matches!(result, Err(LeaveError::InvalidRange { .. })));
    }

    // ==========================================================================
    // SV-004: Unknown policy is rejected
    // ==========================================================================
    #[tokio::test]
    async fn test_sv_004_unknown_policy_rejected() {
        let (service, _) = create_service();
        let result = service
            .create_leave_request(1, input(42, "2024-03-04", "2024-03-08"))
            .await;
        assert!(matches!(result, Err(LeaveError::LeavePolicyNotFound { id: 42 })));
    }

    // ==========================================================================
    // SV-005: Unlimited policy never hits a limit
    // ==========================================================================
    #[tokio::test]
    async fn test_sv_005_unlimited_policy_accepts_long_request() {
        let (service, _) = create_service();
        let created = service
            .create_leave_request(1, input(3, "2024-01-01", "2024-12-31"))
            .await;
        assert!(created.is_ok());
    }

    // ==========================================================================
    // SV-006: Multi-year request is checked per year
    // ==========================================================================
    #[tokio::test]
    async fn test_sv_006_multi_year_checked_per_year() {
        let (service, store) = create_service();
        // 14 annual days already taken in 2024: Mon 2024-06-03 through Thu 2024-06-20
        seed_approved(&store, 1, 1, "2024-06-03", "2024-06-07").await;
        seed_approved(&store, 1, 1, "2024-06-10", "2024-06-14").await;
        seed_approved(&store, 1, 1, "2024-06-17", "2024-06-20").await;

        // Dec 28 - Jan 3: 2024 has Mon 30 and Tue 31, 2025 has Thu 2 and Fri 3
        let result = service
            .create_leave_request(1, input(1, "2024-12-28", "2025-01-03"))
            .await;
        match result {
            Err(LeaveError::LimitExceeded {
                year, requested, remaining, ..
            }) => {
                assert_eq!(year, Some(2024));
                assert_eq!(requested, 4);
                assert_eq!(remaining, 1);
            }
            other => panic!("Expected LimitExceeded, got {:?}", other),
        }

        // The other employee has a fresh allowance in both years
        assert!(
            service
                .create_leave_request(2, input(1, "2024-12-28", "2025-01-03"))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_multi_year_request_charged_in_full_to_start_year() {
        let (service, store) = create_service();
        // 12 annual days taken in 2024: Mon 2024-06-03 through Tue 2024-06-18
        seed_approved(&store, 1, 1, "2024-06-03", "2024-06-07").await;
        seed_approved(&store, 1, 1, "2024-06-10", "2024-06-14").await;
        seed_approved(&store, 1, 1, "2024-06-17", "2024-06-18").await;

        let taken = service.entitlements(1, 2024).await.unwrap();
        assert_eq!(taken.for_policy(1).unwrap().remaining(), Some(3));

        // Mon 30, Tue 31, Thu 2, Fri 3; 2025-01-01 is a holiday.
        // Each year's share fits, the whole request does not fit 2024.
        let result = service
            .create_leave_request(1, input(1, "2024-12-30", "2025-01-03"))
            .await;
        match result {
            Err(LeaveError::LimitExceeded {
                year, requested, remaining, ..
            }) => {
                assert_eq!(year, Some(2024));
                assert_eq!(requested, 4);
                assert_eq!(remaining, 3);
            }
            other => panic!("Expected LimitExceeded, got {:?}", other),
        }
        assert_eq!(service.leave_requests().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_multi_year_request_not_combined() {
        let (service, store) = create_service();
        // 12 days taken in 2025: Mon 2025-03-03 through Tue 2025-03-18
        seed_approved(&store, 1, 1, "2025-03-03", "2025-03-07").await;
        seed_approved(&store, 1, 1, "2025-03-10", "2025-03-14").await;
        seed_approved(&store, 1, 1, "2025-03-17", "2025-03-18").await;

        // 2 days in 2024 and 2 in 2025 fit each year; 4 combined would not fit 2025
        let created = service
            .create_leave_request(1, input(1, "2024-12-28", "2025-01-03"))
            .await;
        assert!(created.is_ok(), "{:?}", created.err());
    }

    #[tokio::test]
    async fn test_unknown_employee_cannot_submit() {
        let (service, _) = create_service();
        let result = service
            .create_leave_request(99, input(1, "2024-03-04", "2024-03-08"))
            .await;
        assert!(matches!(result, Err(LeaveError::EmployeeNotFound { id: 99 })));
    }

    #[tokio::test]
    async fn test_weekend_request_uses_no_allowance() {
        let (service, store) = create_service();
        seed_approved(&store, 1, 2, "2024-01-01", "2024-01-19").await;

        // Saturday and Sunday only
        let created = service
            .create_leave_request(1, input(2, "2024-03-09", "2024-03-10"))
            .await;
        assert!(created.is_ok());
    }

    #[tokio::test]
    async fn test_weekend_days_charged_only_in_entitlement() {
        let (service, _) = create_service();

        // Friday through Monday: two working days, four leave days
        let created = service
            .create_leave_request(1, input(1, "2024-03-08", "2024-03-11"))
            .await
            .unwrap();

        let listed = service.leave_requests().await.unwrap();
        assert_eq!(listed[0].request.id, created.id);
        assert_eq!(listed[0].count_working_days, 2);

        let entitlements = service.entitlements(1, 2024).await.unwrap();
        assert_eq!(entitlements.for_policy(1).unwrap().already_taken, 4);
    }

    #[tokio::test]
    async fn test_rejected_requests_do_not_count() {
        let (service, store) = create_service();
        let request = store
            .insert_leave_request(NewLeaveRequest {
                employee_id: 1,
                leave_policy_id: 1,
                start_date: make_date("2024-03-04"),
                end_date: make_date("2024-03-08"),
            })
            .await
            .unwrap();
        service
            .update_status(request.id, LeaveStatus::Rejected)
            .await
            .unwrap();

        let entitlements = service.entitlements(1, 2024).await.unwrap();
        assert_eq!(entitlements.for_policy(1).unwrap().already_taken, 0);
    }

    #[tokio::test]
    async fn test_current_employee_uses_clock_year() {
        let (service, store) = create_service();
        seed_approved(&store, 1, 1, "2023-03-06", "2023-03-10").await;
        seed_approved(&store, 1, 1, "2024-03-04", "2024-03-05").await;

        let current = service.current_employee(1).await.unwrap();
        assert_eq!(current.details.first_name, "Ragnar");
        assert_eq!(current.entitlement.len(), 3);
        assert_eq!(current.for_policy(1).unwrap().already_taken, 2);
    }

    #[tokio::test]
    async fn test_entitlement_skips_holidays() {
        let (service, store) = create_service();
        seed_approved(&store, 1, 1, "2024-12-23", "2024-12-27").await;

        let entitlements = service.entitlements(1, 2024).await.unwrap();
        assert_eq!(entitlements.for_policy(1).unwrap().already_taken, 4);
    }

    #[tokio::test]
    async fn test_entitlement_for_unknown_employee() {
        let (service, _) = create_service();
        let result = service.entitlements(99, 2024).await;
        assert!(matches!(result, Err(LeaveError::EmployeeNotFound { id: 99 })));
    }

    // ==========================================================================
    // SV-007: Status transitions
    // ==========================================================================
    #[tokio::test]
    async fn test_sv_007_approve_pending_request() {
        let (service, _) = create_service();
        let created = service
            .create_leave_request(1, input(1, "2024-03-04", "2024-03-08"))
            .await
            .unwrap();

        let update = service
            .update_status(created.id, LeaveStatus::Approved)
            .await
            .unwrap();
        assert!(update.success);
        assert_eq!(update.status, LeaveStatus::Approved);

        let listed = service.leave_requests().await.unwrap();
        assert_eq!(listed[0].request.status, LeaveStatus::Approved);
    }

    #[tokio::test]
    async fn test_update_status_unknown_request() {
        let (service, _) = create_service();
        let result = service.update_status(7, LeaveStatus::Approved).await;
        assert!(matches!(result, Err(LeaveError::LeaveRequestNotFound { id: 7 })));
    }

    #[tokio::test]
    async fn test_decided_request_cannot_change() {
        let (service, _) = create_service();
        let created = service
            .create_leave_request(1, input(1, "2024-03-04", "2024-03-08"))
            .await
            .unwrap();
        service
            .update_status(created.id, LeaveStatus::Approved)
            .await
            .unwrap();

        let result = service.update_status(created.id, LeaveStatus::Rejected).await;
        assert!(matches!(
            result,
            Err(LeaveError::InvalidStatusTransition {
                from: LeaveStatus::Approved,
                to: LeaveStatus::Rejected,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_timesheet_uses_only_approved_leave() {
        let (service, store) = create_service();
        seed_approved(&store, 1, 1, "2024-03-04", "2024-03-05").await;
        service
            .create_leave_request(2, input(2, "2024-03-04", "2024-03-05"))
            .await
            .unwrap();

        let sheet = service
            .timesheet(make_date("2024-03-04"), make_date("2024-03-10"))
            .await
            .unwrap();
        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet[0].employee.id, 1);
        assert_eq!(sheet[0].dates.len(), 7);
        assert!(sheet[0].dates[0].leave_policy().is_some());
        // Employee 2's request is still pending
        assert!(sheet[1].dates[0].is_working_day());
    }

    #[tokio::test]
    async fn test_timesheet_rejects_reversed_range() {
        let (service, _) = create_service();
        let result = service
            .timesheet(make_date("2024-03-10"), make_date("2024-03-04"))
            .await;
        assert!(matches!(result, Err(LeaveError::InvalidRange { .. })));
    }

    #[tokio::test]
    async fn test_holidays_in_range() {
        let (service, _) = create_service();
        let holidays = service
            .holidays_in_range(make_date("2024-12-01"), make_date("2025-01-31"))
            .await
            .unwrap();
        let names: Vec<&str> = holidays.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["Christmas Day", "New Year's Day"]);
    }

    #[tokio::test]
    async fn test_dashboard_counts_current_year_days() {
        let (service, store) = create_service();
        seed_approved(&store, 1, 1, "2024-03-04", "2024-03-08").await;
        service
            .create_leave_request(1, input(2, "2024-03-06", "2024-03-06"))
            .await
            .unwrap();
        let rejected = service
            .create_leave_request(2, input(1, "2024-04-01", "2024-04-02"))
            .await
            .unwrap();
        service
            .update_status(rejected.id, LeaveStatus::Rejected)
            .await
            .unwrap();

        let dashboard = service.dashboard_leave_requests().await.unwrap();
        assert_eq!(dashboard.len(), 2);
        // Sick leave wins Wednesday from the annual leave request
        assert_eq!(dashboard[0].total_days_taken, 4);
        assert_eq!(dashboard[1].total_days_taken, 1);
        assert_eq!(dashboard[1].leave_policy.title, "Sick Leave");
    }
}
