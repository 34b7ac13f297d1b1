//! Logging service - structured event logging to DuckDB
//!
//! Stores auth and navigation events in logs.duckdb next to the session file.
//! Tokens, passwords, emails and HR records are never logged; events carry
//! only names, routes, commands and error text.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};
use duckdb::Connection;
use serde::{Deserialize, Serialize};

use crate::log_migrations::LOG_MIGRATIONS;

/// Log database file name inside the FastHR directory
pub const LOG_DB_FILE: &str = "logs.duckdb";

/// Counter for generating unique IDs within the same millisecond
static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a unique ID based on timestamp + counter
fn generate_id() -> u64 {
    // Lower 48 bits: timestamp, upper 16 bits: counter
    let counter = ID_COUNTER.fetch_add(1, Ordering::Relaxed) & 0xFFFF;
    ((now_ms() as u64) << 16) | counter
}

/// Current unix timestamp in milliseconds
fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}

fn detect_platform() -> &'static str {
    if cfg!(target_os = "macos") {
        "macos"
    } else if cfg!(target_os = "windows") {
        "windows"
    } else if cfg!(target_os = "linux") {
        "linux"
    } else {
        "unknown"
    }
}

/// Event names written by the CLI
pub mod events {
    pub const LOGIN_SUCCEEDED: &str = "login_succeeded";
    pub const LOGIN_FAILED: &str = "login_failed";
    pub const LOGOUT: &str = "logout";
    pub const SESSION_EXPIRED: &str = "session_expired";
    pub const ROUTE_REDIRECTED: &str = "route_redirected";
    pub const COMMAND_FAILED: &str = "command_failed";
}

/// A log event to be recorded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_details: Option<String>,
}

impl LogEvent {
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            route: None,
            command: None,
            error_message: None,
            error_details: None,
        }
    }

    /// Route path the event happened on, e.g. `/leaves`
    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = Some(route.into());
        self
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    pub fn with_error_details(mut self, details: impl Into<String>) -> Self {
        self.error_details = Some(details.into());
        self
    }
}

/// A log entry as stored in the database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: u64,
    pub timestamp: i64,
    pub app_version: String,
    pub platform: String,
    pub event: String,
    pub route: Option<String>,
    pub command: Option<String>,
    pub error_message: Option<String>,
    pub error_details: Option<String>,
}

/// Number of entries recorded for one event name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventCount {
    pub event: String,
    pub count: u64,
}

const ENTRY_COLUMNS: &str = "id, timestamp, app_version, platform, event, route, command, error_message, error_details";

fn entry_from_row(row: &duckdb::Row<'_>) -> duckdb::Result<LogEntry> {
    Ok(LogEntry {
        id: row.get(0)?,
        timestamp: row.get(1)?,
        app_version: row.get(2)?,
        platform: row.get(3)?,
        event: row.get(4)?,
        route: row.get(5)?,
        command: row.get(6)?,
        error_message: row.get(7)?,
        error_details: row.get(8)?,
    })
}

/// Service for structured event logging
pub struct LoggingService {
    conn: Mutex<Connection>,
    db_path: PathBuf,
    app_version: String,
    platform: &'static str,
}

impl LoggingService {
    /// Open or create logs.duckdb in the FastHR directory and run any
    /// pending migrations
    pub fn new(fasthr_dir: &Path, app_version: impl Into<String>) -> Result<Self> {
        std::fs::create_dir_all(fasthr_dir)?;
        let db_path = fasthr_dir.join(LOG_DB_FILE);
        let conn = Connection::open(&db_path)?;

        let service = Self {
            conn: Mutex::new(conn),
            db_path,
            app_version: app_version.into(),
            platform: detect_platform(),
        };

        service.run_migrations()?;

        Ok(service)
    }

    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn.lock().map_err(|e| anyhow!("Lock poisoned: {}", e))?;

        let table_exists: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM information_schema.tables WHERE table_name = 'sys_migrations'",
                [],
                |row| row.get(0),
            )
            .unwrap_or(false);

        if !table_exists {
            if let Some((name, sql)) = LOG_MIGRATIONS.iter().find(|(n, _)| *n == "000_migrations.sql")
            {
                conn.execute_batch(sql)?;
                conn.execute(
                    "INSERT INTO sys_migrations (migration_name) VALUES (?)",
                    [name],
                )?;
            }
        }

        let mut stmt = conn.prepare("SELECT migration_name FROM sys_migrations")?;
        let applied: Vec<String> = stmt
            .query_map([], |row| row.get(0))?
            .filter_map(|r| r.ok())
            .collect();

        for (name, sql) in LOG_MIGRATIONS.iter() {
            if *name == "000_migrations.sql" || applied.iter().any(|a| a == name) {
                continue;
            }
            conn.execute_batch(sql)?;
            conn.execute(
                "INSERT INTO sys_migrations (migration_name) VALUES (?)",
                [name],
            )?;
        }

        Ok(())
    }

    /// Record an event; version and platform are filled in here
    pub fn log(&self, event: LogEvent) -> Result<()> {
        let conn = self.conn.lock().map_err(|e| anyhow!("Lock poisoned: {}", e))?;

        conn.execute(
            &format!(
                "INSERT INTO sys_logs ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
                ENTRY_COLUMNS
            ),
            duckdb::params![
                generate_id(),
                now_ms(),
                &self.app_version,
                self.platform,
                &event.event,
                &event.route,
                &event.command,
                &event.error_message,
                &event.error_details,
            ],
        )?;

        Ok(())
    }

    pub fn log_event(&self, event: &str) -> Result<()> {
        self.log(LogEvent::new(event))
    }

    /// Record a guard redirect from one route to another
    pub fn log_redirect(&self, from: &str, to: &str) -> Result<()> {
        self.log(
            LogEvent::new(events::ROUTE_REDIRECTED)
                .with_route(from)
                .with_error_details(format!("redirected to {}", to)),
        )
    }

    pub fn log_error(&self, event: &str, message: &str, details: Option<&str>) -> Result<()> {
        let mut log_event = LogEvent::new(event).with_error(message);
        if let Some(d) = details {
            log_event = log_event.with_error_details(d);
        }
        self.log(log_event)
    }

    /// Most recent entries, newest first
    pub fn get_recent(&self, limit: usize) -> Result<Vec<LogEntry>> {
        self.query_entries("", limit)
    }

    /// Most recent entries that carry an error message
    pub fn get_errors(&self, limit: usize) -> Result<Vec<LogEntry>> {
        self.query_entries("WHERE error_message IS NOT NULL", limit)
    }

    fn query_entries(&self, filter: &str, limit: usize) -> Result<Vec<LogEntry>> {
        let conn = self.conn.lock().map_err(|e| anyhow!("Lock poisoned: {}", e))?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM sys_logs {} ORDER BY timestamp DESC, id DESC LIMIT ?",
            ENTRY_COLUMNS, filter
        ))?;

        let entries = stmt
            .query_map([limit as i64], entry_from_row)?
            .filter_map(|r| r.ok())
            .collect();

        Ok(entries)
    }

    /// Entry counts per event name, most frequent first
    pub fn event_counts(&self) -> Result<Vec<EventCount>> {
        let conn = self.conn.lock().map_err(|e| anyhow!("Lock poisoned: {}", e))?;

        let mut stmt = conn.prepare(
            "SELECT event, COUNT(*) FROM sys_logs GROUP BY event ORDER BY COUNT(*) DESC, event",
        )?;

        let counts = stmt
            .query_map([], |row| {
                Ok(EventCount {
                    event: row.get(0)?,
                    count: row.get(1)?,
                })
            })?
            .filter_map(|r| r.ok())
            .collect();

        Ok(counts)
    }

    pub fn count(&self) -> Result<u64> {
        let conn = self.conn.lock().map_err(|e| anyhow!("Lock poisoned: {}", e))?;
        let count: u64 = conn.query_row("SELECT COUNT(*) FROM sys_logs", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Delete logs older than the given unix ms timestamp
    pub fn delete_before(&self, timestamp_ms: i64) -> Result<u64> {
        let conn = self.conn.lock().map_err(|e| anyhow!("Lock poisoned: {}", e))?;
        let deleted = conn.execute("DELETE FROM sys_logs WHERE timestamp < ?", [timestamp_ms])?;
        Ok(deleted as u64)
    }

    /// Delete every entry
    pub fn clear(&self) -> Result<u64> {
        let conn = self.conn.lock().map_err(|e| anyhow!("Lock poisoned: {}", e))?;
        let deleted = conn.execute("DELETE FROM sys_logs", [])?;
        Ok(deleted as u64)
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}
