//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    AddGuestCommand, AddRoomCommand, CancelCommand, CheckCommand, InitCommand, ListCommand,
    ReserveCommand, RulesCommand, SettingCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for managing room reservations.
#[derive(Parser)]
#[command(name = "ryokan")]
#[command(version, about = "Manage room reservations", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "RYOKAN_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "RYOKAN_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u32>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize the data directory and database
    Init(InitCommand),

    /// Register a room
    AddRoom(AddRoomCommand),

    /// Register a guest
    AddGuest(AddGuestCommand),

    /// Validate and create a reservation
    Reserve(ReserveCommand),

    /// Cancel a reservation
    Cancel(CancelCommand),

    /// List active reservations
    List(ListCommand),

    /// Check a term without reserving
    Check(CheckCommand),

    /// Show inferred validation rules for a table
    Rules(RulesCommand),

    /// Read and write inn-wide settings
    Setting(SettingCommand),
}
