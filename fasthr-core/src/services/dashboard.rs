//! Dashboard statistics

use std::sync::Arc;

use crate::adapters::http::{ApiClient, ApiRequest};
use crate::domain::result::Result;
use crate::domain::DashboardStats;

pub struct DashboardService {
    api: Arc<ApiClient>,
}

impl DashboardService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub fn stats(&self, token: &str) -> Result<DashboardStats> {
        self.api
            .request(&ApiRequest::get("/api/dashboard/stats"), Some(token))
    }
}
