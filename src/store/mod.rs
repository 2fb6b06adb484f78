//! Persistence seams for the record services.
//!
//! Services only talk to these traits; `MySqlStore` backs them in production
//! and the in-memory store backs them in tests.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::model::employee::{Employee, EmployeeFilter, NewEmployee};
use crate::model::leave_request::{LeaveRequest, NewLeaveRequest};

#[cfg(test)]
pub mod memory;
pub mod mysql;

pub use mysql::MySqlStore;

#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn list_employees(&self, filter: &EmployeeFilter) -> Result<Vec<Employee>, StoreError>;

    async fn find_employee(&self, id: u64) -> Result<Option<Employee>, StoreError>;

    async fn employee_exists(&self, id: u64) -> Result<bool, StoreError>;

    /// True when another employee (not `exclude_id`) already has this exact name.
    async fn name_taken(&self, name: &str, exclude_id: Option<u64>) -> Result<bool, StoreError>;

    /// True when another employee (not `exclude_id`) already has this exact email.
    async fn email_taken(&self, email: &str, exclude_id: Option<u64>) -> Result<bool, StoreError>;

    async fn insert_employee(&self, employee: NewEmployee) -> Result<Employee, StoreError>;

    /// Overwrites every column except `id`. `StoreError::Conflict` when the row is gone.
    ///
    /// `MySqlStore` re-checks existence after a write that touched no row, so it
    /// only reports a conflict for a deleted row; a concurrent edit of a live row
    /// is last-writer-wins. Callers still treat a conflict on a live row as
    /// `ServiceError::StorageConflict` for stores that detect it.
    async fn update_employee(&self, employee: &Employee) -> Result<(), StoreError>;

    /// Returns whether a row was removed.
    async fn delete_employee(&self, id: u64) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait LeaveRequestStore: Send + Sync {
    async fn list_leave_requests(
        &self,
        employee_id: Option<u64>,
    ) -> Result<Vec<LeaveRequest>, StoreError>;

    async fn find_leave_request(&self, id: u64) -> Result<Option<LeaveRequest>, StoreError>;

    async fn leave_request_exists(&self, id: u64) -> Result<bool, StoreError>;

    async fn insert_leave_request(&self, leave: NewLeaveRequest) -> Result<LeaveRequest, StoreError>;

    /// Same conflict contract as [`EmployeeStore::update_employee`].
    async fn update_leave_request(&self, leave: &LeaveRequest) -> Result<(), StoreError>;

    async fn delete_leave_request(&self, id: u64) -> Result<bool, StoreError>;
}
