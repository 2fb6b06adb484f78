use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Failures raised by a store implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A write matched no row, the record changed or vanished underneath us.
    #[error("concurrent write conflict")]
    Conflict,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("record was modified concurrently")]
    StorageConflict,

    #[error("photo storage failed: {0}")]
    Photo(#[from] std::io::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict => ServiceError::StorageConflict,
            StoreError::Database(e) => ServiceError::Database(e),
        }
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        ServiceError::Validation(errors)
    }
}

/// One entry of the `errors` array in a 422 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ValidationDetail {
    #[schema(example = "name")]
    pub field: String,
    #[schema(example = "Name is already in use")]
    pub message: String,
}

/// Flattens field errors, ordered by field name.
pub fn validation_details(errors: &ValidationErrors) -> Vec<ValidationDetail> {
    let mut details: Vec<ValidationDetail> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |e| ValidationDetail {
                field: field.to_string(),
                message: e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string()),
            })
        })
        .collect();
    details.sort_by(|a, b| a.field.cmp(&b.field));
    details
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::StorageConflict => StatusCode::CONFLICT,
            ServiceError::Photo(_) | ServiceError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        match self {
            ServiceError::NotFound(entity) => HttpResponse::build(status).json(json!({
                "message": format!("{entity} not found")
            })),
            ServiceError::Validation(errors) => HttpResponse::build(status).json(json!({
                "message": "Validation failed",
                "errors": validation_details(errors)
            })),
            ServiceError::StorageConflict => HttpResponse::build(status).json(json!({
                "message": "The record was modified by another request, reload and try again"
            })),
            ServiceError::Photo(e) => {
                error!(error = %e, "Photo storage failed");
                HttpResponse::build(status).json(json!({
                    "message": "Something went wrong, Contact with system admin"
                }))
            }
            ServiceError::Database(e) => {
                error!(error = %e, "Database error");
                HttpResponse::build(status).json(json!({
                    "message": "Something went wrong, Contact with system admin"
                }))
            }
        }
    }
}
