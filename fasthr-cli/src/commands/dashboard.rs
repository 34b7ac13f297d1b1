//! Dashboard command - the home view

use anyhow::Result;
use colored::Colorize;
use fasthr_core::Route;

use super::{authorized, get_context, get_logger, open_protected, print_json};
use crate::output;

pub fn run(json: bool) -> Result<()> {
    let logger = get_logger();
    let mut ctx = get_context()?;
    open_protected(&mut ctx, &logger, Route::Dashboard)?;

    let stats = authorized(&mut ctx, &logger, |hr, token| hr.dashboard.stats(token))?;
    let on_leave = authorized(&mut ctx, &logger, |hr, token| hr.employees.on_leave(token))?;

    if json {
        return print_json(&serde_json::json!({
            "stats": stats,
            "on_leave": on_leave,
        }));
    }

    if let Some(user) = ctx.auth.user() {
        println!("{} {}", "Welcome back,".bold(), user.name.bold());
        println!();
    }

    let mut table = output::create_table();
    table.add_row(vec!["Employees", &stats.total_employees.to_string()]);
    table.add_row(vec!["On leave today", &stats.on_leave_today.to_string()]);
    table.add_row(vec!["Pending requests", &stats.pending_requests.to_string()]);
    table.add_row(vec!["Birthdays this month", &stats.birthdays_this_month.to_string()]);
    println!("{}", table);

    println!();
    if on_leave.is_empty() {
        output::info("Nobody is on leave today.");
    } else {
        println!("{}", "On Leave Today".bold());
        for employee in &on_leave {
            println!("  • {} ({})", employee.full_name, employee.title.dimmed());
        }
    }

    Ok(())
}
