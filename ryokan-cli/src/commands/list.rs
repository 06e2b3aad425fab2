//! List command implementation.
//!
//! This module implements the `list` command, which displays active
//! reservations in table or JSON form, with each stay classified as
//! past, present, or future against the inn's check-in and check-out
//! settings.

use crate::error::CliError;
use crate::utils::{open_database, GlobalOptions};
use clap::{Args, ValueEnum};
use serde_json::json;
use std::io::Write;
use ryokan::{Reservation, Settings, SystemClock};
use ryokan::clock::Clock;

/// Column headers for table output.
const COLUMN_HEADERS: [&str; 7] = [
    "id", "room", "guest", "start", "end", "nights", "status",
];

/// List active reservations.
#[derive(Args)]
pub struct ListCommand {
    /// Output format
    #[arg(
        long,
        value_enum,
        default_value = "table",
        env = "RYOKAN_OUTPUT_FORMAT",
        ignore_case = true
    )]
    pub format: OutputFormat,

    /// Filter by room id
    #[arg(long, value_name = "ID")]
    pub room: Option<i64>,

    /// Filter by guest id
    #[arg(long, value_name = "ID")]
    pub guest: Option<i64>,
}

/// Output format for list command.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated table format (human-readable)
    Table,
    /// JSON format
    Json,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let db = open_database(global)?;

        let mut reservations = db.list_reservations()?;
        if let Some(room) = self.room {
            reservations.retain(|r| r.room_id() == room);
        }
        if let Some(guest) = self.guest {
            reservations.retain(|r| r.guest_id() == guest);
        }

        let settings = Settings::new(&db);
        let now = SystemClock.now();

        let mut rows = Vec::with_capacity(reservations.len());
        for reservation in &reservations {
            rows.push((reservation, status(reservation, now, &settings)?));
        }

        match self.format {
            OutputFormat::Table => format_as_table(&rows)?,
            OutputFormat::Json => format_as_json(&rows)?,
        }
        Ok(())
    }
}

/// Classifies a reservation against the wall clock.
fn status(
    reservation: &Reservation,
    now: chrono::NaiveDateTime,
    settings: &Settings<&ryokan::Database>,
) -> Result<&'static str, CliError> {
    if reservation.is_present(now, settings)? {
        Ok("present")
    } else if reservation.is_past(now, settings)? {
        Ok("past")
    } else {
        Ok("future")
    }
}

/// Format reservations as a human-readable table.
fn format_as_table(rows: &[(&Reservation, &'static str)]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let header_line = COLUMN_HEADERS
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(handle, "{header_line}")?;

    for (res, status) in rows {
        writeln!(
            handle,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            res.id().unwrap_or_default(),
            res.room_id(),
            res.guest_id(),
            res.start_date(),
            res.end_date(),
            res.nights(),
            status,
        )?;
    }
    Ok(())
}

/// Format reservations as JSON.
fn format_as_json(rows: &[(&Reservation, &'static str)]) -> Result<(), CliError> {
    let items: Vec<_> = rows
        .iter()
        .map(|(res, status)| {
            json!({
                "id": res.id(),
                "room_id": res.room_id(),
                "guest_id": res.guest_id(),
                "start_date": res.start_date().to_string(),
                "end_date": res.end_date().to_string(),
                "checkout": res.checkout().map(|t| t.to_string()),
                "nights": res.nights(),
                "status": status,
            })
        })
        .collect();

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    writeln!(
        handle,
        "{}",
        serde_json::to_string_pretty(&items).map_err(|e| CliError::Io(std::io::Error::other(e)))?
    )?;
    Ok(())
}
