//! Setting command implementation.
//!
//! This module implements the `setting` command group for reading and
//! writing inn-wide settings. Writes are validated against the key's
//! expected shape before being stored, so the engines never see a
//! malformed value.

use crate::error::CliError;
use crate::utils::{open_database, GlobalOptions};
use clap::{Args, Subcommand};
use ryokan::settings;

/// Read and write inn-wide settings.
#[derive(Args)]
pub struct SettingCommand {
    #[command(subcommand)]
    pub action: SettingAction,
}

/// Actions on settings.
#[derive(Subcommand)]
pub enum SettingAction {
    /// Print one setting value
    Get {
        /// Setting key
        key: String,
    },
    /// Write a setting value
    Set {
        /// Setting key
        key: String,
        /// New value
        value: String,
    },
    /// Print all known settings with their effective values
    List,
}

impl SettingCommand {
    /// Execute the setting command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        match self.action {
            SettingAction::Get { key } => {
                let db = open_database(global)?;
                match db.get_setting(&key)? {
                    Some(value) => println!("{value}"),
                    None => {
                        return Err(CliError::SemanticFailure(format!("Setting {key} is unset")))
                    }
                }
            }
            SettingAction::Set { key, value } => {
                validate_value(&key, &value)?;
                let mut db = open_database(global)?;
                db.set_setting(&key, &value)?;
                if !global.quiet {
                    println!("Set {key} = {value}");
                }
            }
            SettingAction::List => {
                let db = open_database(global)?;
                let store = settings::Settings::new(&db);
                println!("max_day\t{}", store.max_day()?);
                println!("checkin\t{}", store.checkin()?);
                println!("checkout\t{}", store.checkout()?);
            }
        }
        Ok(())
    }
}

/// Rejects values the engines could not parse later.
fn validate_value(key: &str, value: &str) -> Result<(), CliError> {
    match key {
        settings::MAX_DAY => {
            value.parse::<i64>().map_err(|_| {
                CliError::InvalidArguments(format!("{key} expects an integer, got {value}"))
            })?;
        }
        settings::CHECKIN | settings::CHECKOUT => {
            settings::parse_time(key, value).map_err(|_| {
                CliError::InvalidArguments(format!("{key} expects HH:MM, got {value}"))
            })?;
        }
        _ => {
            return Err(CliError::InvalidArguments(format!(
                "Unknown setting key: {key}"
            )))
        }
    }
    Ok(())
}
