//! Init command implementation.
//!
//! This module implements the `init` command for explicitly creating
//! the ryokan data directory and database, and seeding the inn-wide
//! settings the other commands read.

use crate::error::CliError;
use crate::utils::{open_database, resolve_database_path, GlobalOptions};
use clap::Args;

/// Settings seeded into a fresh database.
const DEFAULT_SETTINGS: [(&str, &str); 3] = [
    ("checkin", "15:00:00"),
    ("checkout", "10:00:00"),
    ("max_day", "30"),
];

/// Initialize the ryokan data directory and database.
#[derive(Args)]
pub struct InitCommand {
    /// Overwrite settings that already have a value
    #[arg(long)]
    reset_settings: bool,
}

impl InitCommand {
    /// Execute the init command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let db_path = resolve_database_path(global)?;
        let existed = db_path.exists();

        let mut db = open_database(global)?;

        let mut seeded = 0;
        for (key, value) in DEFAULT_SETTINGS {
            if !self.reset_settings && db.get_setting(key)?.is_some() {
                continue;
            }
            db.set_setting(key, value)?;
            seeded += 1;
        }

        if !global.quiet {
            if existed {
                println!("Database already initialized: {}", db_path.display());
            } else {
                println!("Created database: {}", db_path.display());
            }
            if seeded > 0 {
                println!("  - Seeded {seeded} default setting(s)");
            }
        }

        Ok(())
    }
}
