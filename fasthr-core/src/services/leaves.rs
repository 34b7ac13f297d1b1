//! Leave request endpoints

use std::sync::Arc;

use crate::adapters::http::{ApiClient, ApiRequest};
use crate::domain::result::Result;
use crate::domain::{LeaveBalance, LeaveRequest, LeaveUpdate, NewLeave, RequestStatus};

pub struct LeaveService {
    api: Arc<ApiClient>,
}

impl LeaveService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Leave requests, optionally only those in one status
    pub fn list(&self, token: &str, status: Option<RequestStatus>) -> Result<Vec<LeaveRequest>> {
        let mut request = ApiRequest::get("/api/leaves");
        if let Some(status) = status {
            request = request.with_query("status", status.wire_value());
        }
        self.api.request(&request, Some(token))
    }

    pub fn get(&self, token: &str, id: i64) -> Result<LeaveRequest> {
        self.api
            .request(&ApiRequest::get(format!("/api/leaves/{}", id)), Some(token))
    }

    /// Submit a leave request for the logged-in employee
    ///
    /// Dates are sent as given; the server owns date validation.
    pub fn create(&self, token: &str, leave: &NewLeave) -> Result<LeaveRequest> {
        self.api
            .request(&ApiRequest::post("/api/leaves", leave)?, Some(token))
    }

    /// Approve or reject a request
    pub fn update(&self, token: &str, id: i64, update: &LeaveUpdate) -> Result<LeaveRequest> {
        self.api.request(
            &ApiRequest::patch(format!("/api/leaves/{}", id), update)?,
            Some(token),
        )
    }

    pub fn balance(&self, token: &str, employee_id: i64) -> Result<LeaveBalance> {
        self.api.request(
            &ApiRequest::get(format!("/api/leaves/balances/{}", employee_id)),
            Some(token),
        )
    }
}
