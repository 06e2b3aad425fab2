//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `init`: Create the database and seed default settings
//! - `add_room`: Register a room
//! - `add_guest`: Register a guest
//! - `reserve`: Validate and create a reservation
//! - `cancel`: Cancel a reservation
//! - `list`: List active reservations
//! - `check`: Check a term without reserving
//! - `rules`: Show inferred validation rules for a table
//! - `setting`: Read and write inn-wide settings

pub mod add_guest;
pub mod add_room;
pub mod cancel;
pub mod check;
pub mod init;
pub mod list;
pub mod reserve;
pub mod rules;
pub mod setting;

pub use add_guest::AddGuestCommand;
pub use add_room::AddRoomCommand;
pub use cancel::CancelCommand;
pub use check::CheckCommand;
pub use init::InitCommand;
pub use list::ListCommand;
pub use reserve::ReserveCommand;
pub use rules::RulesCommand;
pub use setting::SettingCommand;
