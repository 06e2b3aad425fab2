//! Add-guest command implementation.

use crate::error::CliError;
use crate::utils::{open_database, GlobalOptions};
use clap::Args;
use ryokan::Guest;

/// Register a guest.
#[derive(Args)]
pub struct AddGuestCommand {
    /// Full name
    #[arg(long, value_name = "NAME")]
    pub name: String,

    /// Katakana reading of the name
    #[arg(long, value_name = "KANA")]
    pub kana: Option<String>,

    /// Postal code
    #[arg(long, value_name = "ZIP")]
    pub zip_code: Option<String>,

    /// Street address
    #[arg(long, value_name = "ADDRESS")]
    pub address: Option<String>,

    /// Contact phone number
    #[arg(long, value_name = "PHONE")]
    pub phone: Option<String>,
}

impl AddGuestCommand {
    /// Execute the add-guest command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if self.name.trim().is_empty() {
            return Err(CliError::InvalidArguments(
                "--name must not be empty".to_string(),
            ));
        }

        let mut guest = Guest::new(self.name);
        guest.name_kana = self.kana;
        guest.zip_code = self.zip_code;
        guest.address = self.address;
        guest.phone = self.phone;

        let mut db = open_database(global)?;
        let saved = db.insert_guest(&guest)?;

        if !global.quiet {
            println!("Added guest {}: {}", saved.id.unwrap_or_default(), saved.name);
        }
        Ok(())
    }
}
