//! Login command - exchange credentials for a session

use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use dialoguer::{Input, Password};
use fasthr_core::services::logging::events;
use fasthr_core::services::LogEvent;
use fasthr_core::{GuardDecision, Route};
use indicatif::{ProgressBar, ProgressStyle};

use super::{get_context, get_logger, log_event};
use crate::output;

pub fn run(email: Option<String>, password: Option<String>) -> Result<()> {
    let logger = get_logger();
    let mut ctx = get_context()?;

    match ctx.open(Route::Login) {
        Ok(GuardDecision::Redirect(_)) => {
            let name = ctx.auth.user().map(|u| u.name.as_str()).unwrap_or_default();
            output::info(&format!(
                "Already logged in as {}. Run 'hr logout' to switch accounts.",
                name
            ));
            return Ok(());
        }
        Ok(_) => {}
        // An unreadable session file is overwritten by a successful login
        Err(e) => output::warning(&format!("Ignoring saved session: {}", e)),
    }

    let interactive = atty::is(atty::Stream::Stdin);
    if !interactive && (email.is_none() || password.is_none()) {
        anyhow::bail!("Pass --email and --password when not running interactively");
    }

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let password = match password {
        Some(p) => p,
        None => Password::new().with_prompt("Password").interact()?,
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message("Signing in...");
    spinner.enable_steady_tick(Duration::from_millis(80));

    let result = ctx.auth.login(email.trim(), &password);
    spinner.finish_and_clear();

    match result {
        Ok(profile) => {
            log_event(
                &logger,
                LogEvent::new(events::LOGIN_SUCCEEDED).with_route(Route::Login.path()),
            );
            println!(
                "{} Logged in as {} ({})",
                "Success!".green(),
                profile.name.bold(),
                profile.role
            );
            Ok(())
        }
        Err(e) => {
            log_event(
                &logger,
                LogEvent::new(events::LOGIN_FAILED)
                    .with_route(Route::Login.path())
                    .with_error(e.to_string()),
            );
            Err(e.into())
        }
    }
}
