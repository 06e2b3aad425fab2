//! Add-room command implementation.

use crate::error::CliError;
use crate::utils::{open_database, GlobalOptions};
use clap::Args;
use ryokan::Room;

/// Register a room.
#[derive(Args)]
pub struct AddRoomCommand {
    /// Display name
    #[arg(long, value_name = "NAME")]
    pub name: String,

    /// Guest capacity
    #[arg(long, value_name = "COUNT")]
    pub number: u32,

    /// Price per night
    #[arg(long, value_name = "YEN")]
    pub price: i64,
}

impl AddRoomCommand {
    /// Execute the add-room command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if self.name.trim().is_empty() {
            return Err(CliError::InvalidArguments(
                "--name must not be empty".to_string(),
            ));
        }
        if self.price < 0 {
            return Err(CliError::InvalidArguments(
                "--price must not be negative".to_string(),
            ));
        }

        let mut db = open_database(global)?;
        let saved = db.insert_room(&Room::new(self.name, self.number, self.price))?;

        if !global.quiet {
            println!(
                "Added room {}: {} (capacity {}, {} yen/night)",
                saved.id.unwrap_or_default(),
                saved.name,
                saved.number,
                saved.price
            );
        }
        Ok(())
    }
}
