//! CLI command implementations

pub mod config;
pub mod dashboard;
pub mod employees;
pub mod expenses;
pub mod leaves;
pub mod login;
pub mod logout;
pub mod logs;
pub mod whoami;

use std::path::PathBuf;

use anyhow::{Context, Result};
use fasthr_core::services::logging::events;
use fasthr_core::services::{HrServices, LogEvent, LoggingService};
use fasthr_core::{Error, FastHrContext, GuardDecision, Route};

use crate::output;

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger() -> Option<LoggingService> {
    let fasthr_dir = get_fasthr_dir().ok()?;
    LoggingService::new(&fasthr_dir, env!("CARGO_PKG_VERSION")).ok()
}

/// Log an event, ignoring any errors (logging should never break the app)
pub fn log_event(logger: &Option<LoggingService>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}

/// Get the FastHR directory from environment or default
pub fn get_fasthr_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("FASTHR_DIR") {
        return Ok(PathBuf::from(dir));
    }
    let home = dirs::home_dir().context("Could not find home directory")?;
    Ok(home.join(".fasthr"))
}

/// Build the FastHR context over the session file
pub fn get_context() -> Result<FastHrContext> {
    let fasthr_dir = get_fasthr_dir()?;

    std::fs::create_dir_all(&fasthr_dir)
        .with_context(|| format!("Failed to create FastHR directory: {:?}", fasthr_dir))?;

    FastHrContext::new(&fasthr_dir).context("Failed to initialize FastHR context")
}

/// Open a protected view; a redirect to login becomes an error
pub fn open_protected(
    ctx: &mut FastHrContext,
    logger: &Option<LoggingService>,
    route: Route,
) -> Result<()> {
    match ctx.open(route)? {
        GuardDecision::Redirect(target) => {
            let _ = logger
                .as_ref()
                .map(|l| l.log_redirect(route.path(), target.path()));
            Err(Error::NotAuthenticated.into())
        }
        GuardDecision::Wait => Err(Error::NotAuthenticated.into()),
        GuardDecision::Render(_) => Ok(()),
    }
}

/// Make an authenticated API call, recording a session expiry
pub fn authorized<T>(
    ctx: &mut FastHrContext,
    logger: &Option<LoggingService>,
    call: impl FnOnce(&HrServices, &str) -> fasthr_core::Result<T>,
) -> Result<T> {
    let route = ctx.auth.location();
    let err = match ctx.authorized(call) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    if err.is_unauthorized() {
        log_event(
            logger,
            LogEvent::new(events::SESSION_EXPIRED).with_route(route.path()),
        );
        if let Some(clear_err) = ctx.take_teardown_error() {
            output::warning(&format!("Could not remove the saved session: {}", clear_err));
        }
    }

    Err(err.into())
}

/// Print a value as pretty JSON
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
