//! Check command implementation.
//!
//! This module implements the `check` command, which runs the same
//! validations as `reserve` without writing anything, reporting each
//! outcome. Useful for front-desk "is this possible?" questions and
//! for re-validating an edit with `--exclude`.

use crate::error::CliError;
use crate::utils::{open_database, parse_clock_time, parse_date, GlobalOptions};
use clap::Args;
use ryokan::{Availability, Settings, SystemClock};

/// Check a term without reserving.
#[derive(Args)]
pub struct CheckCommand {
    /// Room id
    #[arg(long, value_name = "ID")]
    pub room: Option<i64>,

    /// Guest id
    #[arg(long, value_name = "ID")]
    pub guest: Option<i64>,

    /// First night (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub start: Option<String>,

    /// Last night (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub end: Option<String>,

    /// Reservation id to ignore (when re-validating an edit)
    #[arg(long, value_name = "ID")]
    pub exclude: Option<i64>,

    /// Booking cutoff time to apply instead of the check-in setting (HH:MM)
    #[arg(long, value_name = "TIME")]
    pub cutoff: Option<String>,
}

impl CheckCommand {
    /// Execute the check command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let start = self
            .start
            .as_deref()
            .map(|raw| parse_date("--start", raw))
            .transpose()?;
        let end = self
            .end
            .as_deref()
            .map(|raw| parse_date("--end", raw))
            .transpose()?;
        let cutoff = self
            .cutoff
            .as_deref()
            .map(|raw| parse_clock_time("--cutoff", raw))
            .transpose()?;

        let db = open_database(global)?;
        let settings = Settings::new(&db);
        let clock = SystemClock;
        let engine = Availability::new(&db, &settings, &clock);

        let term_ok = engine.is_term_valid(start, end, cutoff)?;
        let room_ok = engine.is_reservation_available(self.exclude, self.room, start, end)?;
        let guest_ok = engine.is_not_duplicated(self.exclude, self.guest, start, end)?;

        if !global.quiet {
            println!("term: {}", verdict(term_ok));
            println!("room: {}", verdict(room_ok));
            println!("guest: {}", verdict(guest_ok));
        }

        if term_ok && room_ok && guest_ok {
            Ok(())
        } else {
            Err(CliError::SemanticFailure("Term is not bookable".to_string()))
        }
    }
}

const fn verdict(ok: bool) -> &'static str {
    if ok {
        "ok"
    } else {
        "conflict"
    }
}
