//! Employee roster records

use serde::{Deserialize, Serialize};

/// Employee card shown in the roster grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeCard {
    pub id: i64,
    pub full_name: String,
    pub title: String,
    /// Photo URL or initials
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub is_on_leave: bool,
    #[serde(default)]
    pub department: Option<String>,
}

/// Full employee record for the detail view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeDetail {
    pub id: i64,
    pub full_name: String,
    pub title: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub is_on_leave: bool,
    #[serde(default)]
    pub department: Option<String>,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub start_date: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub emergency_contact: Option<String>,
    /// Only returned to privileged users
    #[serde(default)]
    pub salary: Option<f64>,
}
