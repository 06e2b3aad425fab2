//! Main entry point for the ryokan CLI.
//!
//! This is the command-line interface for the ryokan room-reservation
//! system. It provides commands for managing the inn's data:
//! - `init`: Create the database and seed default settings
//! - `add-room` / `add-guest`: Register master data
//! - `reserve`: Validate and create a reservation
//! - `cancel`: Cancel a reservation
//! - `list`: List active reservations
//! - `check`: Check a term without reserving
//! - `rules`: Show inferred validation rules for a table
//! - `setting`: Read and write inn-wide settings

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let _logger = ryokan::init_logger(cli.verbose, cli.quiet);

    // Convert CLI args to GlobalOptions
    let global = GlobalOptions {
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        busy_timeout: cli.busy_timeout,
    };

    // Execute the command
    let result = match cli.command {
        cli::Command::Init(cmd) => cmd.execute(&global),
        cli::Command::AddRoom(cmd) => cmd.execute(&global),
        cli::Command::AddGuest(cmd) => cmd.execute(&global),
        cli::Command::Reserve(cmd) => cmd.execute(&global),
        cli::Command::Cancel(cmd) => cmd.execute(&global),
        cli::Command::List(cmd) => cmd.execute(&global),
        cli::Command::Check(cmd) => cmd.execute(&global),
        cli::Command::Rules(cmd) => cmd.execute(&global),
        cli::Command::Setting(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
