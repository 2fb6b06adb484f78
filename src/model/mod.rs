pub mod department;
pub mod employee;
pub mod leave_request;
