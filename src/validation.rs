//! Field validation for employee and leave request input.
//!
//! Every rule is a small predicate returning a `validator::ValidationError`;
//! a field runs its rules in order and stops at the first failure, while
//! separate fields are always all checked so one request reports every bad
//! field at once.

use strum::IntoEnumIterator;
use validator::{ValidateEmail, ValidationError, ValidationErrors};

use crate::model::{
    department::Department,
    employee::EmployeeInput,
    leave_request::{CreateLeave, UpdateLeave},
};

/// Column widths of the `employees` and `leave_requests` tables.
pub const NAME_MAX_CHARS: usize = 20;
pub const EMAIL_MAX_CHARS: usize = 255;
pub const LEAVE_TEXT_MAX_CHARS: usize = 50;

type Rule = fn(label: &str, value: &str) -> Result<(), ValidationError>;

fn error(code: &'static str, message: String) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

fn required(label: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(error("required", format!("{label} is required")))
    } else {
        Ok(())
    }
}

fn at_most(label: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        Err(error("length", format!("{label} must be at most {max} characters")))
    } else {
        Ok(())
    }
}

fn name_length(label: &str, value: &str) -> Result<(), ValidationError> {
    at_most(label, value, NAME_MAX_CHARS)
}

fn email_length(label: &str, value: &str) -> Result<(), ValidationError> {
    at_most(label, value, EMAIL_MAX_CHARS)
}

fn leave_text_length(label: &str, value: &str) -> Result<(), ValidationError> {
    at_most(label, value, LEAVE_TEXT_MAX_CHARS)
}

fn email_format(label: &str, value: &str) -> Result<(), ValidationError> {
    if value.validate_email() {
        Ok(())
    } else {
        Err(error("email", format!("{label} is not a valid email address")))
    }
}

fn department_code(label: &str, value: &str) -> Result<(), ValidationError> {
    if Department::from_code(value).is_some() {
        return Ok(());
    }
    let codes: Vec<String> = Department::iter().map(|d| d.to_string()).collect();
    Err(error(
        "department",
        format!("{label} must be one of {}", codes.join(", ")),
    ))
}

fn check(
    errors: &mut ValidationErrors,
    field: &'static str,
    label: &str,
    value: &str,
    rules: &[Rule],
) {
    if let Some(err) = rules.iter().find_map(|rule| rule(label, value).err()) {
        errors.add(field, err);
    }
}

/// Another employee already holds this value.
pub fn already_in_use(label: &str) -> ValidationError {
    error("unique", format!("{label} is already in use"))
}

pub fn unknown_employee() -> ValidationError {
    error("exists", "Employee does not exist".to_string())
}

pub fn validate_employee(input: &EmployeeInput) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    check(&mut errors, "name", "Name", &input.name, &[required, name_length]);
    check(
        &mut errors,
        "email",
        "Email",
        &input.email,
        &[required, email_length, email_format],
    );
    check(
        &mut errors,
        "department",
        "Department",
        &input.department,
        &[required, department_code],
    );
    errors
}

pub fn validate_photo_size(len: usize, max_bytes: usize) -> Result<(), ValidationError> {
    if len > max_bytes {
        Err(error(
            "photo_size",
            format!("Photo must be at most {max_bytes} bytes"),
        ))
    } else {
        Ok(())
    }
}

/// Dates are accepted in any order.
pub fn validate_new_leave(input: &CreateLeave) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    check(
        &mut errors,
        "leave_type",
        "Leave type",
        &input.leave_type,
        &[required, leave_text_length],
    );
    errors
}

/// Any status text is accepted as long as it fits the column.
pub fn validate_leave_update(input: &UpdateLeave) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    check(
        &mut errors,
        "leave_type",
        "Leave type",
        &input.leave_type,
        &[required, leave_text_length],
    );
    if let Some(status) = &input.status {
        check(&mut errors, "status", "Status", status, &[leave_text_length]);
    }
    errors
}

/// Failing field names, sorted.
#[cfg(test)]
pub fn failed_fields(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|field| field.to_string())
        .collect();
    fields.sort();
    fields
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn input(name: &str, email: &str, department: &str) -> EmployeeInput {
        EmployeeInput {
            name: name.into(),
            email: email.into(),
            department: department.into(),
        }
    }

    fn update(leave_type: &str, status: Option<&str>) -> UpdateLeave {
        let day = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
        UpdateLeave {
            employee_id: 1,
            leave_type: leave_type.into(),
            start_date: day,
            end_date: day,
            reason: None,
            status: status.map(str::to_string),
        }
    }

    fn messages(errors: &ValidationErrors, field: &str) -> Vec<String> {
        errors
            .field_errors()
            .iter()
            .filter(|(f, _)| f.to_string() == field)
            .flat_map(|(_, errs)| errs.iter())
            .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .collect()
    }

    #[test]
    fn accepts_valid_employee() {
        assert!(validate_employee(&input("Alice", "a@x.com", "A")).is_empty());
    }

    #[test]
    fn collects_every_bad_field() {
        let errors = validate_employee(&input("", "not-an-email", "Z"));
        assert_eq!(failed_fields(&errors), vec!["department", "email", "name"]);
    }

    #[test]
    fn reports_first_failing_rule_per_field() {
        let errors = validate_employee(&input("Alice", "", "A"));
        assert_eq!(failed_fields(&errors), vec!["email"]);
        assert_eq!(messages(&errors, "email"), vec!["Email is required"]);
    }

    #[test]
    fn name_length_counts_characters() {
        let twenty = "é".repeat(NAME_MAX_CHARS);
        assert!(validate_employee(&input(&twenty, "a@x.com", "B")).is_empty());

        let long = "a".repeat(NAME_MAX_CHARS + 1);
        let errors = validate_employee(&input(&long, "a@x.com", "B"));
        assert_eq!(failed_fields(&errors), vec!["name"]);
    }

    #[test]
    fn email_longer_than_column_is_rejected() {
        let local = "a".repeat(60);
        let label = "b".repeat(60);
        let domain = format!("{label}.{label}.{label}.{label}.com");
        let email = format!("{local}@{domain}");
        assert!(email.chars().count() > EMAIL_MAX_CHARS);

        let errors = validate_employee(&input("Alice", &email, "A"));
        assert_eq!(failed_fields(&errors), vec!["email"]);
        assert_eq!(
            messages(&errors, "email"),
            vec![format!("Email must be at most {EMAIL_MAX_CHARS} characters")]
        );
    }

    #[test]
    fn leave_type_is_required_and_bounded() {
        assert!(validate_leave_update(&update("annual", None)).is_empty());
        assert_eq!(
            failed_fields(&validate_leave_update(&update("  ", None))),
            vec!["leave_type"]
        );
        let long = "x".repeat(200);
        assert_eq!(
            failed_fields(&validate_leave_update(&update(&long, None))),
            vec!["leave_type"]
        );
    }

    #[test]
    fn status_must_fit_column() {
        let fits = "s".repeat(LEAVE_TEXT_MAX_CHARS);
        assert!(validate_leave_update(&update("sick", Some(&fits))).is_empty());

        let long = "s".repeat(LEAVE_TEXT_MAX_CHARS + 1);
        assert_eq!(
            failed_fields(&validate_leave_update(&update("sick", Some(&long)))),
            vec!["status"]
        );
    }

    #[test]
    fn photo_size_limit_is_inclusive() {
        assert!(validate_photo_size(10, 10).is_ok());
        let err = validate_photo_size(11, 10).unwrap_err();
        assert_eq!(err.code, "photo_size");
    }
}
