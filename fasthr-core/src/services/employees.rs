//! Employee roster endpoints

use std::sync::Arc;

use crate::adapters::http::{ApiClient, ApiRequest};
use crate::domain::result::Result;
use crate::domain::{EmployeeCard, EmployeeDetail};

pub struct EmployeeService {
    api: Arc<ApiClient>,
}

impl EmployeeService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// All employees visible to the caller
    pub fn list(&self, token: &str) -> Result<Vec<EmployeeCard>> {
        self.api.request(&ApiRequest::get("/api/employees"), Some(token))
    }

    pub fn get(&self, token: &str, id: i64) -> Result<EmployeeDetail> {
        self.api
            .request(&ApiRequest::get(format!("/api/employees/{}", id)), Some(token))
    }

    /// Employees on leave today
    pub fn on_leave(&self, token: &str) -> Result<Vec<EmployeeCard>> {
        self.api
            .request(&ApiRequest::get("/api/employees/on-leave"), Some(token))
    }
}
