//! In-memory implementation of [`LeaveStore`].

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::{LeaveError, LeaveResult};
use crate::models::{
    Employee, EmployeeId, Holiday, LeavePolicy, LeavePolicyId, LeaveRequest, LeaveRequestId,
    LeaveStatus, NewLeaveRequest,
};

use super::{LeaveRequestFilter, LeaveStore};

#[derive(Debug, Default)]
struct Tables {
    employees: BTreeMap<EmployeeId, Employee>,
    leave_policies: BTreeMap<LeavePolicyId, LeavePolicy>,
    holidays: Vec<Holiday>,
    leave_requests: BTreeMap<LeaveRequestId, LeaveRequest>,
    next_leave_request_id: LeaveRequestId,
}

/// A [`LeaveStore`] holding every table in process memory.
///
/// Reference data (employees, policies, holidays) is fixed at construction;
/// leave requests are created and updated at runtime.
///
/// # Example
///
/// ```
/// use leave_engine::store::{InMemoryStore, LeaveStore};
/// use leave_engine::models::LeavePolicy;
///
/// let store = InMemoryStore::new(
///     vec![],
///     vec![LeavePolicy {
///         id: 1,
///         title: "Annual Leave".to_string(),
///         is_unlimited: false,
///         allowed_days_per_year: Some(15),
///     }],
///     vec![],
/// );
/// let runtime = tokio::runtime::Runtime::new().unwrap();
/// let policies = runtime.block_on(store.leave_policies()).unwrap();
/// assert_eq!(policies.len(), 1);
/// ```
#[derive(Debug)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    /// Creates a store with the given reference data and no leave requests.
    pub fn new(
        employees: Vec<Employee>,
        leave_policies: Vec<LeavePolicy>,
        mut holidays: Vec<Holiday>,
    ) -> Self {
        holidays.sort_by_key(|h| (h.date, h.id));

        Self {
            tables: RwLock::new(Tables {
                employees: employees.into_iter().map(|e| (e.id, e)).collect(),
                leave_policies: leave_policies.into_iter().map(|p| (p.id, p)).collect(),
                holidays,
                leave_requests: BTreeMap::new(),
                next_leave_request_id: 1,
            }),
        }
    }

    fn read(&self) -> LeaveResult<RwLockReadGuard<'_, Tables>> {
        self.tables.read().map_err(|e| LeaveError::Storage {
            message: e.to_string(),
        })
    }

    fn write(&self) -> LeaveResult<RwLockWriteGuard<'_, Tables>> {
        self.tables.write().map_err(|e| LeaveError::Storage {
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl LeaveStore for InMemoryStore {
    async fn employee(&self, id: EmployeeId) -> LeaveResult<Option<Employee>> {
        Ok(self.read()?.employees.get(&id).cloned())
    }

    async fn employees(&self) -> LeaveResult<Vec<Employee>> {
        Ok(self.read()?.employees.values().cloned().collect())
    }

    async fn leave_policy(&self, id: LeavePolicyId) -> LeaveResult<Option<LeavePolicy>> {
        Ok(self.read()?.leave_policies.get(&id).cloned())
    }

    async fn leave_policies(&self) -> LeaveResult<Vec<LeavePolicy>> {
        Ok(self.read()?.leave_policies.values().cloned().collect())
    }

    async fn holidays_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> LeaveResult<Vec<Holiday>> {
        Ok(self
            .read()?
            .holidays
            .iter()
            .filter(|h| h.is_within(start, end))
            .cloned()
            .collect())
    }

    async fn leave_request(&self, id: LeaveRequestId) -> LeaveResult<Option<LeaveRequest>> {
        Ok(self.read()?.leave_requests.get(&id).cloned())
    }

    async fn leave_requests(&self, filter: &LeaveRequestFilter) -> LeaveResult<Vec<LeaveRequest>> {
        Ok(self
            .read()?
            .leave_requests
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }

    async fn insert_leave_request(&self, request: NewLeaveRequest) -> LeaveResult<LeaveRequest> {
        let mut tables = self.write()?;
        let id = tables.next_leave_request_id;
        tables.next_leave_request_id += 1;

        let stored = LeaveRequest {
            id,
            employee_id: request.employee_id,
            leave_policy_id: request.leave_policy_id,
            start_date: request.start_date,
            end_date: request.end_date,
            status: LeaveStatus::Pending,
        };
        tables.leave_requests.insert(id, stored.clone());
        Ok(stored)
    }

    async fn set_leave_request_status(
        &self,
        id: LeaveRequestId,
        status: LeaveStatus,
    ) -> LeaveResult<Option<LeaveRequest>> {
        let mut tables = self.write()?;
        Ok(tables.leave_requests.get_mut(&id).map(|request| {
            request.status = status;
            request.clone()
        }))
    }
}
