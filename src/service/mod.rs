pub mod employee_service;
pub mod leave_service;
pub mod photo_store;

pub use employee_service::EmployeeRecordService;
pub use leave_service::LeaveRequestRecordService;
pub use photo_store::{PhotoAssetStore, PhotoUpload};
