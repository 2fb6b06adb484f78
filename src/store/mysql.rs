use async_trait::async_trait;
use sqlx::MySqlPool;
use tracing::debug;

use super::{EmployeeStore, LeaveRequestStore};
use crate::error::StoreError;
use crate::model::employee::{Employee, EmployeeFilter, NewEmployee};
use crate::model::leave_request::{LeaveRequest, NewLeaveRequest};

const EMPLOYEE_COLUMNS: &str = "id, name, email, department, photo";
const LEAVE_COLUMNS: &str = "id, employee_id, leave_type, start_date, end_date, reason, status";

#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn count(&self, sql: &str, id: u64) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await
    }

    async fn count_other(
        &self,
        column: &str,
        value: &str,
        exclude_id: Option<u64>,
    ) -> Result<i64, sqlx::Error> {
        // ids start at 1, so 0 excludes nothing
        let sql = format!("SELECT COUNT(*) FROM employees WHERE {column} = ? AND id <> ?");
        sqlx::query_scalar::<_, i64>(&sql)
            .bind(value)
            .bind(exclude_id.unwrap_or(0))
            .fetch_one(&self.pool)
            .await
    }
}

/// Escapes LIKE wildcards so search text matches literally.
fn like_pattern(search: &str) -> String {
    let mut escaped = String::with_capacity(search.len() + 2);
    escaped.push('%');
    for c in search.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[async_trait]
impl EmployeeStore for MySqlStore {
    async fn list_employees(&self, filter: &EmployeeFilter) -> Result<Vec<Employee>, StoreError> {
        // ---------- build WHERE clause dynamically ----------
        let mut conditions = Vec::new();
        let mut bindings: Vec<String> = Vec::new();

        if let Some(search) = filter.search_text() {
            conditions.push("(name LIKE ? OR email LIKE ?)");
            let like = like_pattern(search);
            bindings.push(like.clone());
            bindings.push(like);
        }

        if let Some(department) = filter.department_code() {
            conditions.push("department = ?");
            bindings.push(department.to_string());
        }

        let where_clause = if conditions.is_empty() {
            "".to_string()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees {where_clause} ORDER BY id");
        debug!(sql = %sql, bindings = ?bindings, "Fetching employees");

        let mut query = sqlx::query_as::<_, Employee>(&sql);
        for b in &bindings {
            query = query.bind(b);
        }

        Ok(query.fetch_all(&self.pool).await?)
    }

    async fn find_employee(&self, id: u64) -> Result<Option<Employee>, StoreError> {
        let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = ?");
        let employee = sqlx::query_as::<_, Employee>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(employee)
    }

    async fn employee_exists(&self, id: u64) -> Result<bool, StoreError> {
        Ok(self.count("SELECT COUNT(*) FROM employees WHERE id = ?", id).await? > 0)
    }

    async fn name_taken(&self, name: &str, exclude_id: Option<u64>) -> Result<bool, StoreError> {
        Ok(self.count_other("name", name, exclude_id).await? > 0)
    }

    async fn email_taken(&self, email: &str, exclude_id: Option<u64>) -> Result<bool, StoreError> {
        Ok(self.count_other("email", email, exclude_id).await? > 0)
    }

    async fn insert_employee(&self, employee: NewEmployee) -> Result<Employee, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO employees (name, email, department, photo)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&employee.name)
        .bind(&employee.email)
        .bind(&employee.department)
        .bind(&employee.photo)
        .execute(&self.pool)
        .await?;

        Ok(Employee {
            id: result.last_insert_id(),
            name: employee.name,
            email: employee.email,
            department: employee.department,
            photo: employee.photo,
        })
    }

    async fn update_employee(&self, employee: &Employee) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE employees
            SET name = ?, email = ?, department = ?, photo = ?
            WHERE id = ?
            "#,
        )
        .bind(&employee.name)
        .bind(&employee.email)
        .bind(&employee.department)
        .bind(&employee.photo)
        .bind(employee.id)
        .execute(&self.pool)
        .await?;

        // an unchanged row also reports 0 without CLIENT_FOUND_ROWS
        if result.rows_affected() == 0 && !self.employee_exists(employee.id).await? {
            return Err(StoreError::Conflict);
        }
        Ok(())
    }

    async fn delete_employee(&self, id: u64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl LeaveRequestStore for MySqlStore {
    async fn list_leave_requests(
        &self,
        employee_id: Option<u64>,
    ) -> Result<Vec<LeaveRequest>, StoreError> {
        let leaves = match employee_id {
            Some(employee_id) => {
                let sql = format!(
                    "SELECT {LEAVE_COLUMNS} FROM leave_requests WHERE employee_id = ? ORDER BY start_date DESC, id DESC"
                );
                sqlx::query_as::<_, LeaveRequest>(&sql)
                    .bind(employee_id)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let sql = format!(
                    "SELECT {LEAVE_COLUMNS} FROM leave_requests ORDER BY start_date DESC, id DESC"
                );
                sqlx::query_as::<_, LeaveRequest>(&sql)
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(leaves)
    }

    async fn find_leave_request(&self, id: u64) -> Result<Option<LeaveRequest>, StoreError> {
        let sql = format!("SELECT {LEAVE_COLUMNS} FROM leave_requests WHERE id = ?");
        let leave = sqlx::query_as::<_, LeaveRequest>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(leave)
    }

    async fn leave_request_exists(&self, id: u64) -> Result<bool, StoreError> {
        Ok(self.count("SELECT COUNT(*) FROM leave_requests WHERE id = ?", id).await? > 0)
    }

    async fn insert_leave_request(&self, leave: NewLeaveRequest) -> Result<LeaveRequest, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO leave_requests
                (employee_id, leave_type, start_date, end_date, reason, status)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(leave.employee_id)
        .bind(&leave.leave_type)
        .bind(leave.start_date)
        .bind(leave.end_date)
        .bind(&leave.reason)
        .bind(&leave.status)
        .execute(&self.pool)
        .await?;

        Ok(LeaveRequest {
            id: result.last_insert_id(),
            employee_id: leave.employee_id,
            leave_type: leave.leave_type,
            start_date: leave.start_date,
            end_date: leave.end_date,
            reason: leave.reason,
            status: leave.status,
        })
    }

    async fn update_leave_request(&self, leave: &LeaveRequest) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE leave_requests
            SET employee_id = ?, leave_type = ?, start_date = ?, end_date = ?, reason = ?, status = ?
            WHERE id = ?
            "#,
        )
        .bind(leave.employee_id)
        .bind(&leave.leave_type)
        .bind(leave.start_date)
        .bind(leave.end_date)
        .bind(&leave.reason)
        .bind(&leave.status)
        .bind(leave.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 && !self.leave_request_exists(leave.id).await? {
            return Err(StoreError::Conflict);
        }
        Ok(())
    }

    async fn delete_leave_request(&self, id: u64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM leave_requests WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("ali"), "%ali%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
