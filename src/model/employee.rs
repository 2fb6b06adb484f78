use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "name": "Alice",
        "email": "alice@company.com",
        "department": "A",
        "photo": "0b1f3c9e-5d0a-4c57-9c1e-2f7f3f3b8a11.png"
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "Alice")]
    pub name: String,

    #[schema(example = "alice@company.com")]
    pub email: String,

    #[schema(example = "A")]
    pub department: String,

    /// Stored photo filename, relative to the photo directory
    #[schema(example = "0b1f3c9e-5d0a-4c57-9c1e-2f7f3f3b8a11.png", nullable = true)]
    pub photo: Option<String>,
}

/// Editable employee fields, as submitted on create and update.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct EmployeeInput {
    #[schema(example = "Alice")]
    pub name: String,
    #[schema(example = "alice@company.com", format = "email")]
    pub email: String,
    #[schema(example = "A")]
    pub department: String,
}

/// Row to insert; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub department: String,
    pub photo: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
pub struct EmployeeFilter {
    /// Substring matched against name or email
    pub search: Option<String>,
    /// Department code, or `all` for every department
    pub department: Option<String>,
}

pub const ALL_DEPARTMENTS: &str = "all";

impl EmployeeFilter {
    /// Search text as given; blank input means no search.
    pub fn search_text(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// Department to match exactly, `None` when blank or the `all` sentinel.
    pub fn department_code(&self) -> Option<&str> {
        self.department
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty() && !d.eq_ignore_ascii_case(ALL_DEPARTMENTS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(search: Option<&str>, department: Option<&str>) -> EmployeeFilter {
        EmployeeFilter {
            search: search.map(str::to_string),
            department: department.map(str::to_string),
        }
    }

    #[test]
    fn search_text_is_not_trimmed() {
        assert_eq!(filter(Some(" Smith"), None).search_text(), Some(" Smith"));
        assert_eq!(filter(Some("   "), None).search_text(), None);
        assert_eq!(filter(None, None).search_text(), None);
    }

    #[test]
    fn all_sentinel_disables_department_filter() {
        assert_eq!(filter(None, Some("ALL")).department_code(), None);
        assert_eq!(filter(None, Some("")).department_code(), None);
        assert_eq!(filter(None, Some("B")).department_code(), Some("B"));
    }
}
