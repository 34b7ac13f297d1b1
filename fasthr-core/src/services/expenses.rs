//! Expense request endpoints

use std::sync::Arc;

use crate::adapters::http::{ApiClient, ApiRequest};
use crate::domain::result::Result;
use crate::domain::{Expense, ExpenseSummary, ExpenseUpdate, NewExpense, RequestStatus};

pub struct ExpenseService {
    api: Arc<ApiClient>,
}

impl ExpenseService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub fn list(&self, token: &str, status: Option<RequestStatus>) -> Result<Vec<Expense>> {
        let mut request = ApiRequest::get("/api/expenses");
        if let Some(status) = status {
            request = request.with_query("status", status.wire_value());
        }
        self.api.request(&request, Some(token))
    }

    pub fn create(&self, token: &str, expense: &NewExpense) -> Result<Expense> {
        self.api
            .request(&ApiRequest::post("/api/expenses", expense)?, Some(token))
    }

    pub fn update(&self, token: &str, id: i64, update: &ExpenseUpdate) -> Result<Expense> {
        self.api.request(
            &ApiRequest::patch(format!("/api/expenses/{}", id), update)?,
            Some(token),
        )
    }

    /// Per-employee totals; the shape is owned by the server
    pub fn summary(&self, token: &str, employee_id: i64) -> Result<ExpenseSummary> {
        self.api.request(
            &ApiRequest::get(format!("/api/expenses/summary/{}", employee_id)),
            Some(token),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::hr_mock::{MockConfig, MockHrServer};
    use crate::adapters::http::DEFAULT_TIMEOUT;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn service(server: &MockHrServer) -> ExpenseService {
        ExpenseService::new(Arc::new(
            ApiClient::new(&server.base_url(), DEFAULT_TIMEOUT).unwrap(),
        ))
    }

    #[test]
    fn test_list_accepts_numeric_and_string_amounts() {
        let server = MockHrServer::start(MockConfig::default()).unwrap();
        let expenses = service(&server).list(MockConfig::ADMIN_TOKEN, None).unwrap();

        assert_eq!(expenses.len(), 2);
        assert_eq!(expenses[0].amount, Decimal::from_str("250.5").unwrap());
        assert_eq!(expenses[1].amount, Decimal::from_str("1200.00").unwrap());
    }

    #[test]
    fn test_create_and_update() {
        let server = MockHrServer::start(MockConfig::default()).unwrap();
        let expenses = service(&server);

        let new = NewExpense {
            expense_type: "Yemek".to_string(),
            amount: Decimal::from_str("84.90").unwrap(),
            date: NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
            description: "Müşteri yemeği".to_string(),
            receipt_url: None,
        };
        let created = expenses.create(MockConfig::EMPLOYEE_TOKEN, &new).unwrap();
        assert_eq!(created.status, RequestStatus::Pending);
        assert_eq!(created.amount, Decimal::from_str("84.9").unwrap());

        let body = server.requests_to("/api/expenses")[0].json_body();
        assert!(body.get("receipt_url").is_none());

        let update = ExpenseUpdate {
            status: RequestStatus::Approved,
            rejection_reason: None,
        };
        let updated = expenses.update(MockConfig::ADMIN_TOKEN, 1, &update).unwrap();
        assert_eq!(updated.status, RequestStatus::Approved);
    }

    #[test]
    fn test_summary() {
        let server = MockHrServer::start(MockConfig::default()).unwrap();
        let summary = service(&server).summary(MockConfig::ADMIN_TOKEN, 2).unwrap();
        assert_eq!(summary.fields["pending"], serde_json::json!(1));
    }
}
