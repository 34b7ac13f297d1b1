//! Route guard - decides whether the session may see a view

use std::fmt;

use serde::{Deserialize, Serialize};

/// Navigable views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Login,
    Dashboard,
    Employees,
    Leaves,
    Expenses,
}

impl Route {
    /// The route shown after a successful login
    pub const HOME: Route = Route::Dashboard;

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Dashboard => "/",
            Route::Employees => "/employees",
            Route::Leaves => "/leaves",
            Route::Expenses => "/expenses",
        }
    }

    /// Resolve a path; anything unknown lands on the dashboard
    pub fn from_path(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "/login" => Route::Login,
            "/employees" => Route::Employees,
            "/leaves" => Route::Leaves,
            "/expenses" => Route::Expenses,
            _ => Route::Dashboard,
        }
    }

    /// Every route except login requires a session
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GuardPhase {
    /// Persisted session not read yet
    Loading,
    Authenticated,
    Unauthenticated,
}

/// Outcome of guarding a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Still loading: show nothing, go nowhere
    Wait,
    Render(Route),
    Redirect(Route),
}

impl GuardDecision {
    /// The location this decision lands on, if any
    pub fn location(&self) -> Option<Route> {
        match self {
            GuardDecision::Wait => None,
            GuardDecision::Render(route) | GuardDecision::Redirect(route) => Some(*route),
        }
    }
}

pub struct RouteGuard;

impl RouteGuard {
    pub fn decide(phase: GuardPhase, route: Route) -> GuardDecision {
        match (phase, route.is_protected()) {
            (GuardPhase::Loading, _) => GuardDecision::Wait,
            (GuardPhase::Unauthenticated, true) => GuardDecision::Redirect(Route::Login),
            (GuardPhase::Unauthenticated, false) => GuardDecision::Render(route),
            (GuardPhase::Authenticated, false) => GuardDecision::Redirect(Route::HOME),
            (GuardPhase::Authenticated, true) => GuardDecision::Render(route),
        }
    }
}
