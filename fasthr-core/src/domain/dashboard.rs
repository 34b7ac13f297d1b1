//! Dashboard summary

use serde::{Deserialize, Serialize};

/// Headline numbers shown on the home view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_employees: i64,
    #[serde(default)]
    pub on_leave_today: i64,
    #[serde(default)]
    pub pending_requests: i64,
    #[serde(default)]
    pub birthdays_this_month: i64,
}
