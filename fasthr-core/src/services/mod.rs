//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case or feature area.

pub mod auth;
mod dashboard;
mod employees;
mod expenses;
pub mod guard;
mod leaves;
pub mod logging;
pub mod session;

use std::sync::Arc;

use crate::adapters::http::ApiClient;

pub use auth::AuthService;
pub use dashboard::DashboardService;
pub use employees::EmployeeService;
pub use expenses::ExpenseService;
pub use guard::{GuardDecision, GuardPhase, Route, RouteGuard};
pub use leaves::LeaveService;
pub use logging::{EventCount, LogEntry, LogEvent, LoggingService};
pub use session::SessionStore;

/// The bearer-authenticated HR endpoints
pub struct HrServices {
    pub employees: EmployeeService,
    pub leaves: LeaveService,
    pub expenses: ExpenseService,
    pub dashboard: DashboardService,
}

impl HrServices {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            employees: EmployeeService::new(Arc::clone(&api)),
            leaves: LeaveService::new(Arc::clone(&api)),
            expenses: ExpenseService::new(Arc::clone(&api)),
            dashboard: DashboardService::new(api),
        }
    }
}
