//! Employees command - browse the roster

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use comfy_table::{Cell, Color};
use fasthr_core::{EmployeeCard, Route};

use super::{authorized, get_context, get_logger, open_protected, print_json};
use crate::output;

#[derive(Subcommand)]
pub enum EmployeesCommands {
    /// List all employees
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one employee in detail
    Show {
        /// Employee ID
        id: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List employees on leave today
    OnLeave {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(command: EmployeesCommands) -> Result<()> {
    let logger = get_logger();
    let mut ctx = get_context()?;
    open_protected(&mut ctx, &logger, Route::Employees)?;

    match command {
        EmployeesCommands::List { json } => {
            let employees = authorized(&mut ctx, &logger, |hr, token| hr.employees.list(token))?;
            if json {
                return print_json(&employees);
            }
            print_roster(&employees);
        }
        EmployeesCommands::OnLeave { json } => {
            let employees =
                authorized(&mut ctx, &logger, |hr, token| hr.employees.on_leave(token))?;
            if json {
                return print_json(&employees);
            }
            if employees.is_empty() {
                output::info("Nobody is on leave today.");
                return Ok(());
            }
            print_roster(&employees);
        }
        EmployeesCommands::Show { id, json } => {
            let employee = authorized(&mut ctx, &logger, |hr, token| hr.employees.get(token, id))?;
            if json {
                return print_json(&employee);
            }

            println!("{}", employee.full_name.bold());
            println!("{}", employee.title.dimmed());
            println!();

            let mut table = output::create_table();
            table.add_row(vec!["ID".to_string(), employee.id.to_string()]);
            table.add_row(vec!["Department".to_string(), output::or_dash(employee.department.as_deref())]);
            table.add_row(vec!["Email".to_string(), employee.email.clone()]);
            table.add_row(vec!["Phone".to_string(), output::or_dash(employee.phone.as_deref())]);
            table.add_row(vec!["Start date".to_string(), employee.start_date.clone()]);
            table.add_row(vec!["Birth date".to_string(), output::or_dash(employee.birth_date.as_deref())]);
            table.add_row(vec!["Address".to_string(), output::or_dash(employee.address.as_deref())]);
            table.add_row(vec![
                "Emergency contact".to_string(),
                output::or_dash(employee.emergency_contact.as_deref()),
            ]);
            if let Some(salary) = employee.salary {
                table.add_row(vec!["Salary".to_string(), format!("{:.2}", salary)]);
            }
            table.add_row(vec![
                "On leave".to_string(),
                if employee.is_on_leave { "yes" } else { "no" }.to_string(),
            ]);
            println!("{}", table);
        }
    }

    Ok(())
}

fn print_roster(employees: &[EmployeeCard]) {
    if employees.is_empty() {
        println!("No employees found.");
        return;
    }

    let mut table = output::create_table();
    table.set_header(vec!["ID", "Name", "Title", "Department", "Status"]);
    for employee in employees {
        let status = if employee.is_on_leave {
            Cell::new("on leave").fg(Color::Yellow)
        } else {
            Cell::new("active").fg(Color::Green)
        };
        table.add_row(vec![
            Cell::new(employee.id),
            Cell::new(&employee.full_name),
            Cell::new(&employee.title),
            Cell::new(output::or_dash(employee.department.as_deref())),
            status,
        ]);
    }
    println!("{}", table);
    println!("{} employees", employees.len());
}
