//! Log database migrations - embedded SQL files
//!
//! Migrations are compiled into the binary with include_str! and applied in
//! name order. `000_migrations.sql` bootstraps the tracking table.

/// All log migrations as (filename, sql_content)
///
/// To add a migration, create `NNN_description.sql` and append it here.
pub const LOG_MIGRATIONS: &[(&str, &str)] = &[
    ("000_migrations.sql", include_str!("000_migrations.sql")),
    (
        "001_initial_schema.sql",
        include_str!("001_initial_schema.sql"),
    ),
];
