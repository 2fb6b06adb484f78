use actix_web::{HttpResponse, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::ServiceError;
use crate::model::leave_request::{CreateLeave, LeaveFilter, LeaveRequest, UpdateLeave};
use crate::service::LeaveRequestRecordService;

#[derive(Serialize, ToSchema)]
#[schema(example = json!({
    "data": [
        {
            "id": 1,
            "employee_id": 1000,
            "leave_type": "sick",
            "start_date": "2026-01-01",
            "end_date": "2026-01-03",
            "reason": null,
            "status": "pending"
        }
    ],
    "total": 1
}))]
pub struct LeaveListResponse {
    pub data: Vec<LeaveRequest>,
    #[schema(example = 1)]
    pub total: usize,
}

/// for getting leave applications endpoint
#[utoipa::path(
    get,
    path = "/api/leave",
    params(LeaveFilter),
    responses(
        (status = 200, description = "Leave list", body = LeaveListResponse)
    ),
    tag = "Leave"
)]
pub async fn leave_list(
    service: web::Data<LeaveRequestRecordService>,
    query: web::Query<LeaveFilter>,
) -> Result<HttpResponse, ServiceError> {
    let leaves = service.list(query.employee_id).await?;

    Ok(HttpResponse::Ok().json(LeaveListResponse {
        total: leaves.len(),
        data: leaves,
    }))
}

/// for getting a leave application details endpoint
#[utoipa::path(
    get,
    path = "/api/leave/{leave_id}",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave request to fetch")
    ),
    responses(
        (status = 200, description = "Leave request found", body = LeaveRequest),
        (status = 404, description = "Leave request not found", body = Object, example = json!({
            "message": "Leave request not found"
        }))
    ),
    tag = "Leave"
)]
pub async fn get_leave(
    service: web::Data<LeaveRequestRecordService>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ServiceError> {
    let leave = service.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(leave))
}

/* =========================
Create leave request
========================= */
#[utoipa::path(
    post,
    path = "/api/leave",
    request_body(
        content = CreateLeave,
        description = "Leave request payload",
        content_type = "application/json"
    ),
    responses(
        (status = 201, description = "Leave request submitted", body = LeaveRequest),
        (status = 422, description = "Validation failed")
    ),
    tag = "Leave"
)]
pub async fn create_leave(
    service: web::Data<LeaveRequestRecordService>,
    payload: web::Json<CreateLeave>,
) -> Result<HttpResponse, ServiceError> {
    let leave = service.create(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(leave))
}

/* =========================
Update leave request
========================= */
#[utoipa::path(
    put,
    path = "/api/leave/{leave_id}",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave request to update")
    ),
    request_body = UpdateLeave,
    responses(
        (status = 200, description = "Leave request updated", body = LeaveRequest),
        (status = 404, description = "Leave request not found"),
        (status = 409, description = "Modified concurrently"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Leave"
)]
pub async fn update_leave(
    service: web::Data<LeaveRequestRecordService>,
    path: web::Path<u64>,
    payload: web::Json<UpdateLeave>,
) -> Result<HttpResponse, ServiceError> {
    let leave = service
        .update(path.into_inner(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(leave))
}

#[utoipa::path(
    delete,
    path = "/api/leave/{leave_id}",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave request to delete")
    ),
    responses(
        (status = 204, description = "Deleted, or already absent")
    ),
    tag = "Leave"
)]
pub async fn delete_leave(
    service: web::Data<LeaveRequestRecordService>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ServiceError> {
    service.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
