//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including database path resolution and argument parsing.

use crate::error::CliError;
use chrono::{NaiveDate, NaiveTime};
use std::path::PathBuf;
use ryokan::database::{default_data_dir, Database, DatabaseConfig};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds).
    pub busy_timeout: Option<u32>,
}

/// Resolve the database path from global options.
///
/// Priority: `--data-dir` > default `~/.ryokan`.
pub fn resolve_database_path(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    if let Some(ref data_dir) = global.data_dir {
        return Ok(data_dir.join("ryokan.db"));
    }
    let data_dir = default_data_dir().map_err(CliError::from)?;
    Ok(data_dir.join("ryokan.db"))
}

/// Open the database, creating it (and its directory) if missing.
pub fn open_database(global: &GlobalOptions) -> Result<Database, CliError> {
    let db_path = resolve_database_path(global)?;

    let mut db_config = DatabaseConfig::new(db_path);
    if let Some(timeout_seconds) = global.busy_timeout {
        db_config =
            db_config.with_busy_timeout(std::time::Duration::from_secs(timeout_seconds.into()));
    }

    Database::open(db_config).map_err(CliError::from)
}

/// Parse an ISO `YYYY-MM-DD` date argument.
pub fn parse_date(name: &str, value: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| CliError::InvalidArguments(format!("{name}: expected YYYY-MM-DD, got {value}")))
}

/// Parse an `HH:MM` or `HH:MM:SS` time argument.
pub fn parse_clock_time(name: &str, value: &str) -> Result<NaiveTime, CliError> {
    ryokan::settings::parse_time(name, value)
        .map_err(|_| CliError::InvalidArguments(format!("{name}: expected HH:MM, got {value}")))
}
