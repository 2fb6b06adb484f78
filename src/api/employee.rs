use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use serde::Serialize;
use utoipa::ToSchema;

use super::multipart::read_employee_form;
use crate::error::ServiceError;
use crate::model::employee::{Employee, EmployeeFilter};
use crate::service::EmployeeRecordService;

/// Multipart body accepted by create and update.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct EmployeeUploadForm {
    #[schema(example = "Alice")]
    pub name: String,
    #[schema(example = "alice@company.com", format = "email")]
    pub email: String,
    #[schema(example = "A")]
    pub department: String,
    #[schema(value_type = Option<String>, format = Binary)]
    pub photo: Option<Vec<u8>>,
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeListResponse {
    pub data: Vec<Employee>,
    #[schema(example = 1)]
    pub total: usize,
}

#[utoipa::path(
    get,
    path = "/api/employees",
    params(
        ("search" = Option<String>, Query, description = "Substring of name or email"),
        ("department" = Option<String>, Query, description = "Department code, or `all`")
    ),
    responses(
        (status = 200, description = "Employee list", body = EmployeeListResponse)
    ),
    tag = "Employee"
)]
pub async fn list_employees(
    service: web::Data<EmployeeRecordService>,
    query: web::Query<EmployeeFilter>,
) -> Result<HttpResponse, ServiceError> {
    let employees = service.list(&query).await?;

    Ok(HttpResponse::Ok().json(EmployeeListResponse {
        total: employees.len(),
        data: employees,
    }))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id" = u64, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    service: web::Data<EmployeeRecordService>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ServiceError> {
    let employee = service.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(employee))
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body(content = EmployeeUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 422, description = "Validation failed", body = Object, example = json!({
            "message": "Validation failed",
            "errors": [{ "field": "name", "message": "Name is already in use" }]
        }))
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    service: web::Data<EmployeeRecordService>,
    payload: Multipart,
) -> actix_web::Result<HttpResponse> {
    let form = read_employee_form(payload, service.photos().max_bytes()).await?;
    let employee = service.create(form.input, form.photo).await?;
    Ok(HttpResponse::Created().json(employee))
}

/// Update Employee
#[utoipa::path(
    put,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id" = u64, Path, description = "Employee ID")
    ),
    request_body(content = EmployeeUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Employee updated", body = Employee),
        (status = 404, description = "Employee not found"),
        (status = 409, description = "Modified concurrently"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Employee"
)]
pub async fn update_employee(
    service: web::Data<EmployeeRecordService>,
    path: web::Path<u64>,
    payload: Multipart,
) -> actix_web::Result<HttpResponse> {
    let employee_id = path.into_inner();
    let form = read_employee_form(payload, service.photos().max_bytes()).await?;
    let employee = service.update(employee_id, form.input, form.photo).await?;
    Ok(HttpResponse::Ok().json(employee))
}

/// Delete Employee. Succeeds whether or not the employee still exists.
#[utoipa::path(
    delete,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id" = u64, Path, description = "Employee ID")
    ),
    responses(
        (status = 204, description = "Deleted, or already absent")
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    service: web::Data<EmployeeRecordService>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ServiceError> {
    service.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
