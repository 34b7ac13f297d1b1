//! Logout command - end the current session

use anyhow::Result;
use fasthr_core::services::logging::events;
use fasthr_core::services::LogEvent;
use fasthr_core::Route;

use super::{get_context, get_logger, log_event};
use crate::output;

pub fn run() -> Result<()> {
    let logger = get_logger();
    let mut ctx = get_context()?;

    // A corrupt session file still gets cleared below
    let was_logged_in = ctx.auth.rehydrate().map(|s| s.is_authenticated()).unwrap_or(false);

    ctx.auth.logout()?;
    log_event(
        &logger,
        LogEvent::new(events::LOGOUT).with_route(Route::Login.path()),
    );

    if was_logged_in {
        output::success("Logged out.");
    } else {
        output::info("Not logged in.");
    }
    Ok(())
}
