//! Expenses command - expense requests and summaries

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Subcommand;
use colored::Colorize;
use comfy_table::Cell;
use fasthr_core::{Expense, ExpenseUpdate, NewExpense, RequestStatus, Route};
use rust_decimal::Decimal;

use super::{authorized, get_context, get_logger, open_protected, print_json};
use crate::output;

#[derive(Subcommand)]
pub enum ExpensesCommands {
    /// List expense requests
    List {
        /// Only show one status (pending, approved, rejected)
        #[arg(long)]
        status: Option<RequestStatus>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Submit a new expense
    New {
        /// Expense type, e.g. "Yol", "Yemek"
        #[arg(long = "type")]
        expense_type: String,
        /// Amount, e.g. 250.50
        #[arg(long)]
        amount: Decimal,
        /// Date of the expense (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// What the expense was for
        #[arg(long, default_value = "")]
        description: String,
        /// Link to the receipt
        #[arg(long)]
        receipt_url: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Approve or reject an expense
    Update {
        /// Expense ID
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
    /// Show an employee's expense totals
    Summary {
        /// Employee ID
        employee_id: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(command: ExpensesCommands) -> Result<()> {
    let logger = get_logger();
    let mut ctx = get_context()?;
    open_protected(&mut ctx, &logger, Route::Expenses)?;

    match command {
        ExpensesCommands::List { status, json } => {
            let expenses =
                authorized(&mut ctx, &logger, |hr, token| hr.expenses.list(token, status))?;
            if json {
                return print_json(&expenses);
            }
            print_expenses(&expenses);
        }
        ExpensesCommands::New {
            expense_type,
            amount,
            date,
            description,
            receipt_url,
            json,
        } => {
            let new = NewExpense {
                expense_type,
                amount,
                date: date.unwrap_or_else(|| Local::now().date_naive()),
                description,
                receipt_url,
            };
            let expense =
                authorized(&mut ctx, &logger, |hr, token| hr.expenses.create(token, &new))?;
            if json {
                return print_json(&expense);
            }
            output::success(&format!(
                "Expense submitted: {} {} on {}",
                output::format_amount(expense.amount),
                expense.expense_type,
                expense.date
            ));
        }
        ExpensesCommands::Update {
            id,
            status,
            reason,
            json,
        } => {
            let update = ExpenseUpdate {
                status,
                rejection_reason: reason,
            };
            let expense =
                authorized(&mut ctx, &logger, |hr, token| hr.expenses.update(token, id, &update))?;
            if json {
                return print_json(&expense);
            }
            output::success(&format!("Expense {} is now {}", id, expense.status));
        }
        ExpensesCommands::Summary { employee_id, json } => {
            let summary = authorized(&mut ctx, &logger, |hr, token| {
                hr.expenses.summary(token, employee_id)
            })?;
            if json {
                return print_json(&summary);
            }

            println!("{}", format!("Expenses for employee {}", employee_id).bold());
            let mut table = output::create_table();
            for (key, value) in &summary.fields {
                let shown = match value {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                table.add_row(vec![key.replace('_', " "), shown]);
            }
            println!("{}", table);
        }
    }

    Ok(())
}

fn print_expenses(expenses: &[Expense]) {
    if expenses.is_empty() {
        println!("No expenses found.");
        return;
    }

    let mut table = output::create_table();
    table.set_header(vec!["ID", "Employee", "Type", "Date", "Amount", "Description", "Status"]);
    let mut total = Decimal::ZERO;
    for expense in expenses {
        total += expense.amount;
        table.add_row(vec![
            Cell::new(expense.id.map(|id| id.to_string()).unwrap_or_default()),
            Cell::new(output::or_dash(expense.employee_name.as_deref())),
            Cell::new(&expense.expense_type),
            Cell::new(expense.date),
            Cell::new(output::format_amount(expense.amount)),
            Cell::new(&expense.description),
            output::status_cell(expense.status),
        ]);
    }
    println!("{}", table);
    println!("Total: {}", output::format_amount(total).bold());
}
