use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};
use utoipa::ToSchema;

/// Department codes an employee can belong to.
#[derive(
    Debug,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
    ToSchema,
)]
pub enum Department {
    A,
    B,
    C,
    D,
    E,
}

impl Department {
    pub fn from_code(code: &str) -> Option<Self> {
        code.parse().ok()
    }
}
