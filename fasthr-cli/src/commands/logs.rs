//! Logs command - view and manage application logs

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use fasthr_core::services::LoggingService;

use super::get_fasthr_dir;
use crate::output;

#[derive(Subcommand)]
pub enum LogsCommands {
    /// Show recent log entries
    List {
        /// Number of entries to show
        #[arg(short, long, default_value = "50")]
        limit: usize,
        /// Show only errors
        #[arg(long)]
        errors: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Clear log entries
    Clear {
        /// Only delete logs older than N days
        #[arg(long)]
        older_than_days: Option<u64>,
        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show log statistics and database path
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn get_logging_service() -> Result<LoggingService> {
    let fasthr_dir = get_fasthr_dir()?;
    LoggingService::new(&fasthr_dir, env!("CARGO_PKG_VERSION"))
}

fn format_timestamp(timestamp_ms: i64) -> String {
    use chrono::{Local, TimeZone};
    Local
        .timestamp_millis_opt(timestamp_ms)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| timestamp_ms.to_string())
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Cutoff for `--older-than-days`, saturating instead of overflowing
fn cutoff_ms(now: i64, days: u64) -> i64 {
    let days = i64::try_from(days).unwrap_or(i64::MAX);
    now.saturating_sub(days.saturating_mul(DAY_MS))
}

pub fn run(command: LogsCommands) -> Result<()> {
    match command {
        LogsCommands::List { limit, errors, json } => {
            let service = get_logging_service()?;
            let entries = if errors {
                service.get_errors(limit)?
            } else {
                service.get_recent(limit)?
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
                return Ok(());
            }

            if entries.is_empty() {
                println!("No log entries found.");
                return Ok(());
            }

            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Time", "Event", "Context", "Error"]);

            for entry in &entries {
                let context = [entry.route.as_deref(), entry.command.as_deref()]
                    .iter()
                    .filter_map(|&s| s)
                    .collect::<Vec<_>>()
                    .join(", ");

                table.add_row(vec![
                    format_timestamp(entry.timestamp),
                    entry.event.clone(),
                    context,
                    entry.error_message.clone().unwrap_or_default(),
                ]);
            }

            println!("{}", table);
        }
        LogsCommands::Clear {
            older_than_days,
            force,
            json,
        } => {
            let service = get_logging_service()?;

            if !force && !json {
                use dialoguer::Confirm;
                let prompt = match older_than_days {
                    Some(days) => format!("Delete logs older than {} days?", days),
                    None => "Delete all logs?".to_string(),
                };
                if !Confirm::new().with_prompt(prompt).default(false).interact()? {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            let deleted = match older_than_days {
                Some(days) => {
                    service.delete_before(cutoff_ms(now_ms(), days))?
                }
                None => service.clear()?,
            };

            if json {
                println!("{}", serde_json::json!({ "deleted": deleted }));
            } else {
                output::success(&format!("Deleted {} log entries", deleted));
            }
        }
        LogsCommands::Stats { json } => {
            let service = get_logging_service()?;
            let total = service.count()?;
            let by_event = service.event_counts()?;
            let db_path = service.db_path().to_path_buf();
            let size_bytes = std::fs::metadata(&db_path).map(|m| m.len()).unwrap_or(0);

            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "total_entries": total,
                        "events": by_event,
                        "database_path": db_path.to_string_lossy(),
                        "database_size_bytes": size_bytes
                    })
                );
                return Ok(());
            }

            println!("{}", "Log Statistics".bold());
            println!("  Total entries: {}", total);
            println!("  Database: {}", db_path.display());
            println!("  Size: {}", output::format_size(size_bytes));

            if !by_event.is_empty() {
                println!();
                let mut table = output::create_table();
                table.set_header(vec!["Event", "Count"]);
                for row in by_event {
                    table.add_row(vec![row.event, row.count.to_string()]);
                }
                println!("{}", table);
            }
        }
    }

    Ok(())
}
