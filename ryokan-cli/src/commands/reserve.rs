//! Reserve command implementation.
//!
//! This module implements the `reserve` command, which validates a
//! proposed stay against the booking window, room availability, and
//! the guest's other reservations before inserting it.

use crate::error::CliError;
use crate::utils::{open_database, parse_clock_time, parse_date, GlobalOptions};
use clap::Args;
use ryokan::{Availability, Error as LibError, Reservation, Settings, SystemClock};

/// Validate and create a reservation.
#[derive(Args)]
pub struct ReserveCommand {
    /// Room id
    #[arg(long, value_name = "ID")]
    pub room: i64,

    /// Guest id
    #[arg(long, value_name = "ID")]
    pub guest: i64,

    /// First night (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub start: String,

    /// Last night (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub end: String,

    /// Per-reservation check-out time (HH:MM)
    #[arg(long, value_name = "TIME")]
    pub checkout: Option<String>,
}

impl ReserveCommand {
    /// Execute the reserve command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let start = parse_date("--start", &self.start)?;
        let end = parse_date("--end", &self.end)?;
        let checkout = self
            .checkout
            .as_deref()
            .map(|raw| parse_clock_time("--checkout", raw))
            .transpose()?;

        let mut db = open_database(global)?;

        // The referenced master data must exist
        if db.find_room(self.room)?.is_none() {
            return Err(LibError::NotFound {
                resource: format!("room {}", self.room),
            }
            .into());
        }
        if db.find_guest(self.guest)?.is_none() {
            return Err(LibError::NotFound {
                resource: format!("guest {}", self.guest),
            }
            .into());
        }

        {
            let settings = Settings::new(&db);
            let clock = SystemClock;
            let engine = Availability::new(&db, &settings, &clock);

            if !engine.is_term_valid(Some(start), Some(end), None)? {
                return Err(CliError::SemanticFailure(format!(
                    "Term {start} to {end} is not bookable (check ordering and the max_day setting)"
                )));
            }
            if !engine.is_reservation_available(None, Some(self.room), Some(start), Some(end))? {
                return Err(CliError::SemanticFailure(format!(
                    "Room {} is already reserved between {start} and {end}",
                    self.room
                )));
            }
            if !engine.is_not_duplicated(None, Some(self.guest), Some(start), Some(end))? {
                return Err(CliError::SemanticFailure(format!(
                    "Guest {} already holds a reservation between {start} and {end}",
                    self.guest
                )));
            }
        }

        let reservation = Reservation::builder(self.room, self.guest, start, end)
            .checkout(checkout)
            .build();
        let saved = db.insert_reservation(&reservation)?;

        if !global.quiet {
            println!(
                "Reserved room {} for guest {}: reservation {} ({} night(s))",
                saved.room_id(),
                saved.guest_id(),
                saved.id().unwrap_or_default(),
                saved.nights()
            );
        }
        Ok(())
    }
}
