//! FastHR Core - session, request pipeline and route guard for the FastHR API
//!
//! This crate implements the client core following hexagonal architecture:
//!
//! - **domain**: HR entities and the session model
//! - **ports**: Trait definitions for external dependencies (KeyValueStore)
//! - **services**: Auth flow, route guard and the HR endpoint services
//! - **adapters**: Concrete implementations (reqwest API client, session file)

pub mod domain;
pub mod ports;
pub mod services;
pub mod adapters;
pub mod config;
pub mod log_migrations;

use std::path::Path;
use std::sync::Arc;

use adapters::file_store::FileKeyValueStore;
use adapters::http::ApiClient;
use config::Config;
use ports::KeyValueStore;
use services::*;

// Re-export commonly used types at crate root
pub use domain::{
    DashboardStats, EmployeeCard, EmployeeDetail, Expense, ExpenseSummary, ExpenseUpdate,
    LeaveBalance, LeaveRequest, LeaveUpdate, NewExpense, NewLeave, RequestStatus, Role, Session,
    UserProfile,
};
pub use domain::result::{Error, Result};
pub use services::{GuardDecision, GuardPhase, Route};

/// Main context for FastHR operations
///
/// This is the composition root: it wires the API client, the session store
/// and the services together, and is where a 401 turns into a logout.
pub struct FastHrContext {
    pub config: Config,
    pub auth: AuthService,
    pub services: HrServices,
    // Store failure from the last 401 teardown, if any
    teardown_error: Option<Error>,
}

impl FastHrContext {
    /// Create a context backed by `session.json` in the FastHR directory
    pub fn new(fasthr_dir: &Path) -> Result<Self> {
        let config = Config::load(fasthr_dir)?;
        let store = Arc::new(FileKeyValueStore::new(fasthr_dir));
        Self::with_store(config, store)
    }

    /// Create a context over any key-value store
    pub fn with_store(config: Config, store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let api = Arc::new(ApiClient::new(&config.api_base_url, config.timeout())?);

        Ok(Self {
            auth: AuthService::new(Arc::clone(&api), SessionStore::new(store)),
            services: HrServices::new(api),
            config,
            teardown_error: None,
        })
    }

    /// Navigate to a route through the guard
    ///
    /// Rehydrates the session first if that has not happened yet, then
    /// records wherever the decision lands.
    pub fn open(&mut self, route: Route) -> Result<GuardDecision> {
        if self.auth.phase() == GuardPhase::Loading {
            self.auth.rehydrate()?;
        }

        let decision = RouteGuard::decide(self.auth.phase(), route);
        if let Some(location) = decision.location() {
            self.auth.navigate(location);
        }

        Ok(decision)
    }

    /// Open a protected route, failing if the guard sends us to login
    pub fn require(&mut self, route: Route) -> Result<()> {
        match self.open(route)? {
            GuardDecision::Render(_) => Ok(()),
            GuardDecision::Redirect(Route::Login) | GuardDecision::Wait => {
                Err(Error::NotAuthenticated)
            }
            GuardDecision::Redirect(_) => Ok(()),
        }
    }

    /// Run an authenticated call with the session token
    ///
    /// A 401 from the call ends the session and moves to login before the
    /// error is returned. The caller always gets the 401 back; if the
    /// persisted session could not be removed, that failure is available
    /// from [`take_teardown_error`](Self::take_teardown_error).
    pub fn authorized<T>(&mut self, call: impl FnOnce(&HrServices, &str) -> Result<T>) -> Result<T> {
        if !self.auth.session().is_authenticated() {
            return Err(Error::NotAuthenticated);
        }

        let outcome = match self.auth.session().token() {
            Some(token) => call(&self.services, token),
            None => return Err(Error::NotAuthenticated),
        };

        if matches!(outcome, Err(ref e) if e.is_unauthorized()) {
            self.teardown_error = self.auth.expire_session().err();
        }

        outcome
    }

    /// Take the store error left by the last 401 teardown
    pub fn take_teardown_error(&mut self) -> Option<Error> {
        self.teardown_error.take()
    }
}
