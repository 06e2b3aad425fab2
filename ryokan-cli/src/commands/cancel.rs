//! Cancel command implementation.

use crate::error::CliError;
use crate::utils::{open_database, GlobalOptions};
use clap::Args;

/// Cancel a reservation.
#[derive(Args)]
pub struct CancelCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: i64,
}

impl CancelCommand {
    /// Execute the cancel command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut db = open_database(global)?;
        db.cancel_reservation(self.id)?;

        if !global.quiet {
            println!("Cancelled reservation {}", self.id);
        }
        Ok(())
    }
}
