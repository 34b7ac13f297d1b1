//! Leaves command - leave requests and balances

use anyhow::Result;
use chrono::NaiveDate;
use clap::Subcommand;
use colored::Colorize;
use comfy_table::Cell;
use fasthr_core::{LeaveRequest, LeaveUpdate, NewLeave, RequestStatus, Route};

use super::{authorized, get_context, get_logger, open_protected, print_json};
use crate::output;

#[derive(Subcommand)]
pub enum LeavesCommands {
    /// List leave requests
    List {
        /// Only show one status (pending, approved, rejected)
        #[arg(long)]
        status: Option<RequestStatus>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one leave request
    Show {
        /// Leave request ID
        id: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Submit a new leave request
    New {
        /// Leave type, e.g. "Yıllık İzin"
        #[arg(long = "type")]
        leave_type: String,
        /// First day (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,
        /// Last day (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,
        /// Reason for the leave
        #[arg(long, default_value = "")]
        reason: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Approve or reject a leave request
    Update {
        /// Leave request ID
        id: i64,
        /// New status (approved, rejected, pending)
        #[arg(long)]
        status: RequestStatus,
        /// Rejection reason
        #[arg(long)]
        reason: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show an employee's remaining leave
    Balance {
        /// Employee ID
        employee_id: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(command: LeavesCommands) -> Result<()> {
    let logger = get_logger();
    let mut ctx = get_context()?;
    open_protected(&mut ctx, &logger, Route::Leaves)?;

    match command {
        LeavesCommands::List { status, json } => {
            let leaves = authorized(&mut ctx, &logger, |hr, token| hr.leaves.list(token, status))?;
            if json {
                return print_json(&leaves);
            }
            print_leaves(&leaves);
        }
        LeavesCommands::Show { id, json } => {
            let leave = authorized(&mut ctx, &logger, |hr, token| hr.leaves.get(token, id))?;
            if json {
                return print_json(&leave);
            }
            print_leave(&leave);
        }
        LeavesCommands::New {
            leave_type,
            start,
            end,
            reason,
            json,
        } => {
            let new = NewLeave {
                leave_type,
                start_date: start,
                end_date: end,
                reason,
            };
            let leave = authorized(&mut ctx, &logger, |hr, token| hr.leaves.create(token, &new))?;
            if json {
                return print_json(&leave);
            }
            output::success(&format!(
                "Leave request submitted: {} day(s), {} to {}",
                leave.days, leave.start_date, leave.end_date
            ));
        }
        LeavesCommands::Update {
            id,
            status,
            reason,
            json,
        } => {
            let update = LeaveUpdate {
                status,
                rejection_reason: reason,
            };
            let leave =
                authorized(&mut ctx, &logger, |hr, token| hr.leaves.update(token, id, &update))?;
            if json {
                return print_json(&leave);
            }
            output::success(&format!("Leave request {} is now {}", id, leave.status));
        }
        LeavesCommands::Balance { employee_id, json } => {
            let balance =
                authorized(&mut ctx, &logger, |hr, token| hr.leaves.balance(token, employee_id))?;
            if json {
                return print_json(&balance);
            }

            let mut table = output::create_table();
            table.set_header(vec!["Type", "Entitled", "Used", "Remaining"]);
            table.add_row(vec![
                "Annual".to_string(),
                balance.annual.to_string(),
                balance.annual_used.to_string(),
                (balance.annual - balance.annual_used).to_string(),
            ]);
            table.add_row(vec![
                "Sick".to_string(),
                balance.sick.to_string(),
                balance.sick_used.to_string(),
                (balance.sick - balance.sick_used).to_string(),
            ]);
            println!("{}", table);
        }
    }

    Ok(())
}

fn print_leaves(leaves: &[LeaveRequest]) {
    if leaves.is_empty() {
        println!("No leave requests found.");
        return;
    }

    let mut table = output::create_table();
    table.set_header(vec!["ID", "Employee", "Type", "From", "To", "Days", "Status"]);
    for leave in leaves {
        table.add_row(vec![
            Cell::new(leave.id.map(|id| id.to_string()).unwrap_or_default()),
            Cell::new(&leave.employee_name),
            Cell::new(&leave.leave_type),
            Cell::new(leave.start_date),
            Cell::new(leave.end_date),
            Cell::new(leave.days),
            output::status_cell(leave.status),
        ]);
    }
    println!("{}", table);
}

fn print_leave(leave: &LeaveRequest) {
    println!("{} {}", leave.leave_type.bold(), format!("({})", leave.status).dimmed());

    let mut table = output::create_table();
    table.add_row(vec!["Employee".to_string(), leave.employee_name.clone()]);
    table.add_row(vec![
        "Dates".to_string(),
        format!("{} to {}", leave.start_date, leave.end_date),
    ]);
    table.add_row(vec!["Days".to_string(), leave.days.to_string()]);
    table.add_row(vec!["Reason".to_string(), output::or_dash(Some(&leave.reason))]);
    table.add_row(vec![
        "Submitted".to_string(),
        output::or_dash(leave.created_at.as_deref()),
    ]);
    println!("{}", table);
}
