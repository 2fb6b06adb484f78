use std::sync::Arc;

use tracing::{info, instrument, warn};
use validator::ValidationErrors;

use crate::error::{ServiceError, StoreError};
use crate::model::leave_request::{
    CreateLeave, DEFAULT_LEAVE_STATUS, LeaveRequest, NewLeaveRequest, UpdateLeave,
};
use crate::store::{EmployeeStore, LeaveRequestStore};
use crate::validation::{unknown_employee, validate_leave_update, validate_new_leave};

const ENTITY: &str = "Leave request";

/// Plain CRUD over leave requests. Dates and status are stored as given.
#[derive(Clone)]
pub struct LeaveRequestRecordService {
    leaves: Arc<dyn LeaveRequestStore>,
    employees: Arc<dyn EmployeeStore>,
}

impl LeaveRequestRecordService {
    pub fn new(leaves: Arc<dyn LeaveRequestStore>, employees: Arc<dyn EmployeeStore>) -> Self {
        Self { leaves, employees }
    }

    pub async fn list(&self, employee_id: Option<u64>) -> Result<Vec<LeaveRequest>, ServiceError> {
        Ok(self.leaves.list_leave_requests(employee_id).await?)
    }

    pub async fn get(&self, id: u64) -> Result<LeaveRequest, ServiceError> {
        self.leaves
            .find_leave_request(id)
            .await?
            .ok_or(ServiceError::NotFound(ENTITY))
    }

    #[instrument(name = "leave_create", skip(self, input), fields(employee_id = input.employee_id))]
    pub async fn create(&self, input: CreateLeave) -> Result<LeaveRequest, ServiceError> {
        let errors = validate_new_leave(&input);
        self.check_owner(errors, input.employee_id).await?;

        let leave = self
            .leaves
            .insert_leave_request(NewLeaveRequest {
                employee_id: input.employee_id,
                leave_type: input.leave_type,
                start_date: input.start_date,
                end_date: input.end_date,
                reason: input.reason,
                status: DEFAULT_LEAVE_STATUS.to_string(),
            })
            .await?;

        info!(leave_id = leave.id, "Leave request created");
        Ok(leave)
    }

    #[instrument(name = "leave_update", skip(self, input))]
    pub async fn update(&self, id: u64, input: UpdateLeave) -> Result<LeaveRequest, ServiceError> {
        let mut leave = self.get(id).await?;

        let errors = validate_leave_update(&input);
        self.check_owner(errors, input.employee_id).await?;

        leave.employee_id = input.employee_id;
        leave.leave_type = input.leave_type;
        leave.start_date = input.start_date;
        leave.end_date = input.end_date;
        leave.reason = input.reason;
        if let Some(status) = input.status {
            leave.status = status;
        }

        if let Err(e) = self.leaves.update_leave_request(&leave).await {
            return Err(self.write_failure(id, e).await);
        }

        info!(leave_id = id, status = %leave.status, "Leave request updated");
        Ok(leave)
    }

    /// Idempotent, like employee deletion.
    #[instrument(name = "leave_delete", skip(self))]
    pub async fn delete(&self, id: u64) -> Result<(), ServiceError> {
        if self.leaves.delete_leave_request(id).await? {
            info!(leave_id = id, "Leave request deleted");
        }
        Ok(())
    }

    async fn check_owner(
        &self,
        mut errors: ValidationErrors,
        employee_id: u64,
    ) -> Result<(), ServiceError> {
        if !self.employees.employee_exists(employee_id).await? {
            errors.add("employee_id", unknown_employee());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors.into())
        }
    }

    async fn write_failure(&self, id: u64, err: StoreError) -> ServiceError {
        match err {
            StoreError::Conflict => match self.leaves.leave_request_exists(id).await {
                Ok(false) => ServiceError::NotFound(ENTITY),
                Ok(true) => {
                    warn!(leave_id = id, "Concurrent update conflict");
                    ServiceError::StorageConflict
                }
                Err(e) => e.into(),
            },
            other => other.into(),
        }
    }
}
