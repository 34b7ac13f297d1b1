//! FastHR CLI - human resources in your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{config, dashboard, employees, expenses, leaves, login, logout, logs, whoami};
use fasthr_core::services::logging::events;
use fasthr_core::services::LogEvent;

/// FastHR - human resources in your terminal
#[derive(Parser)]
#[command(name = "hr", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in to the FastHR API
    Login {
        /// Account email (prompted if missing)
        #[arg(long)]
        email: Option<String>,
        /// Account password (prompted if missing)
        #[arg(long, env = "FASTHR_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// End the current session
    Logout,

    /// Show the logged-in user
    Whoami {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the dashboard
    Dashboard {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Browse employees
    Employees {
        #[command(subcommand)]
        command: employees::EmployeesCommands,
    },

    /// Manage leave requests
    Leaves {
        #[command(subcommand)]
        command: leaves::LeavesCommands,
    },

    /// Manage expense requests
    Expenses {
        #[command(subcommand)]
        command: expenses::ExpensesCommands,
    },

    /// View or change settings
    Config {
        #[command(subcommand)]
        command: config::ConfigCommands,
    },

    /// View and manage application logs
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Login { .. } => "login",
            Commands::Logout => "logout",
            Commands::Whoami { .. } => "whoami",
            Commands::Dashboard { .. } => "dashboard",
            Commands::Employees { .. } => "employees",
            Commands::Leaves { .. } => "leaves",
            Commands::Expenses { .. } => "expenses",
            Commands::Config { .. } => "config",
            Commands::Logs { .. } => "logs",
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let command = cli.command.name();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            commands::log_event(
                &commands::get_logger(),
                LogEvent::new(events::COMMAND_FAILED)
                    .with_command(command)
                    .with_error(e.to_string()),
            );
            ExitCode::FAILURE
        }
    }
}

fn report(e: &anyhow::Error) {
    output::error(&e.to_string());

    match e.downcast_ref::<fasthr_core::Error>() {
        Some(fasthr_core::Error::Unauthorized { .. }) => {
            output::hint("Run 'hr login' to sign in again.");
        }
        Some(fasthr_core::Error::Storage(_)) => {
            output::hint("Run 'hr logout' to reset the saved session.");
        }
        Some(fasthr_core::Error::Transport(_)) => {
            output::hint("Check the API address with 'hr config show'.");
        }
        _ => {}
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Login { email, password } => login::run(email, password),
        Commands::Logout => logout::run(),
        Commands::Whoami { json } => whoami::run(json),
        Commands::Dashboard { json } => dashboard::run(json),
        Commands::Employees { command } => employees::run(command),
        Commands::Leaves { command } => leaves::run(command),
        Commands::Expenses { command } => expenses::run(command),
        Commands::Config { command } => config::run(command),
        Commands::Logs { command } => logs::run(command),
    }
}
