use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{EmployeeStore, LeaveRequestStore};
use crate::error::StoreError;
use crate::model::employee::{Employee, EmployeeFilter, NewEmployee};
use crate::model::leave_request::{LeaveRequest, NewLeaveRequest};

#[derive(Default)]
struct Tables {
    employees: BTreeMap<u64, Employee>,
    leave_requests: BTreeMap<u64, LeaveRequest>,
    next_employee_id: u64,
    next_leave_id: u64,
    conflict_next_update: bool,
}

/// Store used by unit tests. Matching is case-sensitive.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next update report a write conflict even though the row exists.
    pub fn conflict_on_next_update(&self) {
        self.tables.lock().unwrap().conflict_next_update = true;
    }

    /// Removes a row behind the service's back, like a concurrent delete would.
    pub fn remove_employee_row(&self, id: u64) {
        self.tables.lock().unwrap().employees.remove(&id);
    }

    pub fn employee_count(&self) -> usize {
        self.tables.lock().unwrap().employees.len()
    }

    fn take_conflict(tables: &mut Tables) -> bool {
        std::mem::take(&mut tables.conflict_next_update)
    }
}

#[async_trait]
impl EmployeeStore for MemoryStore {
    async fn list_employees(&self, filter: &EmployeeFilter) -> Result<Vec<Employee>, StoreError> {
        let tables = self.tables.lock().unwrap();
        let search = filter.search_text();
        let department = filter.department_code();
        Ok(tables
            .employees
            .values()
            .filter(|e| search.is_none_or(|s| e.name.contains(s) || e.email.contains(s)))
            .filter(|e| department.is_none_or(|d| e.department == d))
            .cloned()
            .collect())
    }

    async fn find_employee(&self, id: u64) -> Result<Option<Employee>, StoreError> {
        Ok(self.tables.lock().unwrap().employees.get(&id).cloned())
    }

    async fn employee_exists(&self, id: u64) -> Result<bool, StoreError> {
        Ok(self.tables.lock().unwrap().employees.contains_key(&id))
    }

    async fn name_taken(&self, name: &str, exclude_id: Option<u64>) -> Result<bool, StoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .employees
            .values()
            .any(|e| e.name == name && Some(e.id) != exclude_id))
    }

    async fn email_taken(&self, email: &str, exclude_id: Option<u64>) -> Result<bool, StoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .employees
            .values()
            .any(|e| e.email == email && Some(e.id) != exclude_id))
    }

    async fn insert_employee(&self, employee: NewEmployee) -> Result<Employee, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        tables.next_employee_id += 1;
        let row = Employee {
            id: tables.next_employee_id,
            name: employee.name,
            email: employee.email,
            department: employee.department,
            photo: employee.photo,
        };
        tables.employees.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_employee(&self, employee: &Employee) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().unwrap();
        if Self::take_conflict(&mut tables) {
            return Err(StoreError::Conflict);
        }
        match tables.employees.get_mut(&employee.id) {
            Some(row) => {
                *row = employee.clone();
                Ok(())
            }
            None => Err(StoreError::Conflict),
        }
    }

    async fn delete_employee(&self, id: u64) -> Result<bool, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        let removed = tables.employees.remove(&id).is_some();
        // ON DELETE CASCADE
        tables.leave_requests.retain(|_, l| l.employee_id != id);
        Ok(removed)
    }
}

#[async_trait]
impl LeaveRequestStore for MemoryStore {
    async fn list_leave_requests(
        &self,
        employee_id: Option<u64>,
    ) -> Result<Vec<LeaveRequest>, StoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .leave_requests
            .values()
            .filter(|l| employee_id.is_none_or(|id| l.employee_id == id))
            .cloned()
            .collect())
    }

    async fn find_leave_request(&self, id: u64) -> Result<Option<LeaveRequest>, StoreError> {
        Ok(self.tables.lock().unwrap().leave_requests.get(&id).cloned())
    }

    async fn leave_request_exists(&self, id: u64) -> Result<bool, StoreError> {
        Ok(self.tables.lock().unwrap().leave_requests.contains_key(&id))
    }

    async fn insert_leave_request(&self, leave: NewLeaveRequest) -> Result<LeaveRequest, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        tables.next_leave_id += 1;
        let row = LeaveRequest {
            id: tables.next_leave_id,
            employee_id: leave.employee_id,
            leave_type: leave.leave_type,
            start_date: leave.start_date,
            end_date: leave.end_date,
            reason: leave.reason,
            status: leave.status,
        };
        tables.leave_requests.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_leave_request(&self, leave: &LeaveRequest) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().unwrap();
        if Self::take_conflict(&mut tables) {
            return Err(StoreError::Conflict);
        }
        match tables.leave_requests.get_mut(&leave.id) {
            Some(row) => {
                *row = leave.clone();
                Ok(())
            }
            None => Err(StoreError::Conflict),
        }
    }

    async fn delete_leave_request(&self, id: u64) -> Result<bool, StoreError> {
        Ok(self.tables.lock().unwrap().leave_requests.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bob() -> NewEmployee {
        NewEmployee {
            name: "Bob".into(),
            email: "bob@x.com".into(),
            department: "A".into(),
            photo: None,
        }
    }

    #[actix_web::test]
    async fn unchanged_update_succeeds_and_missing_row_conflicts() {
        let store = MemoryStore::new();
        let row = store.insert_employee(bob()).await.unwrap();

        store.update_employee(&row).await.unwrap();

        store.remove_employee_row(row.id);
        assert!(matches!(
            store.update_employee(&row).await,
            Err(StoreError::Conflict)
        ));
    }

    #[actix_web::test]
    async fn taken_checks_compare_exactly() {
        let store = MemoryStore::new();
        let row = store.insert_employee(bob()).await.unwrap();

        assert!(store.name_taken("Bob", None).await.unwrap());
        assert!(!store.name_taken("Bob ", None).await.unwrap());
        assert!(!store.name_taken("bob", None).await.unwrap());
        assert!(!store.name_taken("Bob", Some(row.id)).await.unwrap());
        assert!(!store.email_taken("BOB@x.com", None).await.unwrap());
    }
}
