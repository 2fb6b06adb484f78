use crate::api::employee::{EmployeeListResponse, EmployeeUploadForm};
use crate::api::leave_request::LeaveListResponse;
use crate::model::employee::{Employee, EmployeeFilter};
use crate::model::leave_request::{CreateLeave, LeaveFilter, LeaveRequest, UpdateLeave};
use crate::error::ValidationDetail;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HR Records API",
        version = "1.0.0",
        description = r#"
## HR record keeping

Employee and leave request records.

### Key Features
- **Employees**
  - Create, update, list, view and delete employee records
  - Search by name or email, filter by department (`all` for every department)
  - Upload a photo with `multipart/form-data`; replacing it removes the old file
- **Leave requests**
  - Create, update, list (optionally per employee), view and delete

### Errors
- `404` when a record does not exist
- `422` with an `errors` array of `{ field, message }` when input is invalid,
  including a name or email already used by another employee
- `409` when a record changed concurrently

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::create_employee,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,

        crate::api::leave_request::leave_list,
        crate::api::leave_request::get_leave,
        crate::api::leave_request::create_leave,
        crate::api::leave_request::update_leave,
        crate::api::leave_request::delete_leave
    ),
    components(
        schemas(
            Employee,
            EmployeeFilter,
            EmployeeUploadForm,
            EmployeeListResponse,
            LeaveRequest,
            CreateLeave,
            UpdateLeave,
            LeaveFilter,
            LeaveListResponse,
            ValidationDetail
        )
    ),
    tags(
        (name = "Employee", description = "Employee management APIs"),
        (name = "Leave", description = "Leave management APIs"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for path in [
            "/api/employees",
            "/api/employees/{employee_id}",
            "/api/leave",
            "/api/leave/{leave_id}",
        ] {
            assert!(paths.iter().any(|p| p.as_str() == path), "missing {path}");
        }
    }
}
