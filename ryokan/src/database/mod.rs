//! `SQLite` persistence layer.
//!
//! This module stores guests, rooms, reservations, and settings, and
//! implements the collaborator traits the engines consume:
//! [`crate::availability::ReservationStore`] (overlap queries),
//! [`crate::settings::SettingsStore`] (setting reads), and
//! [`crate::schema::SchemaProvider`] (live column introspection for
//! rule inference).
//!
//! # Examples
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use ryokan::database::{Database, DatabaseConfig};
//! use ryokan::{Guest, Reservation, Room};
//!
//! let config = DatabaseConfig::new("/tmp/ryokan.db");
//! let mut db = Database::open(config).unwrap();
//!
//! let room = db.insert_room(&Room::new("Sakura", 2, 12000)).unwrap();
//! let guest = db.insert_guest(&Guest::new("Yamada Taro")).unwrap();
//!
//! let start = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
//! let end = NaiveDate::from_ymd_opt(2026, 9, 3).unwrap();
//! let reservation =
//!     Reservation::builder(room.id.unwrap(), guest.id.unwrap(), start, end).build();
//! let saved = db.insert_reservation(&reservation).unwrap();
//! println!("{:?}", saved.id());
//! ```

mod config;
mod connection;
mod introspect;
pub mod migrations;
mod operations;
mod schema;
#[cfg(test)]
pub(crate) mod test_util;

pub use config::{default_data_dir, DatabaseConfig};
pub use connection::Database;
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
