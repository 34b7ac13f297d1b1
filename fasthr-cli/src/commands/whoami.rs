//! Whoami command - show the logged-in user

use anyhow::Result;
use colored::Colorize;
use fasthr_core::Error;

use super::{get_context, print_json};
use crate::output;

pub fn run(json: bool) -> Result<()> {
    let mut ctx = get_context()?;
    let session = ctx.auth.rehydrate()?;
    let user = session.user().ok_or(Error::NotAuthenticated)?;

    if json {
        return print_json(user);
    }

    let mut table = output::create_table();
    table.add_row(vec!["Name", user.name.as_str()]);
    table.add_row(vec!["Email", user.email.as_str()]);
    table.add_row(vec!["Role", user.role.as_str()]);

    println!("{}", "Current User".bold());
    println!("{}", table);
    println!("API: {}", ctx.config.api_base_url.dimmed());
    Ok(())
}
