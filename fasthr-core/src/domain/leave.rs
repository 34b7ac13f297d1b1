//! Leave request records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::RequestStatus;

/// A leave request as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequest {
    #[serde(default)]
    pub id: Option<i64>,
    pub employee_id: i64,
    pub employee_name: String,
    /// Free-form type, e.g. "Yıllık İzin"
    pub leave_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: i64,
    pub reason: String,
    pub status: RequestStatus,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body of `POST /api/leaves`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLeave {
    pub leave_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
}

/// Body of `PATCH /api/leaves/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveUpdate {
    pub status: RequestStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

/// Remaining leave entitlement for one employee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveBalance {
    pub annual: i64,
    pub annual_used: i64,
    pub sick: i64,
    pub sick_used: i64,
}
