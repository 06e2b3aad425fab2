#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # ryokan
//!
//! A library for managing room reservations at a small inn.
//!
//! Two engines make up the core. The first infers field validation
//! rules for create and update requests from schema metadata, so rules
//! never drift from the tables they guard. The second answers
//! availability questions: whether a proposed term is orderly and
//! within the advance-booking window, and whether a room or guest is
//! already booked over it.
//!
//! ## Core Types
//!
//! - [`Reservation`], [`Room`], and [`Guest`]: the domain records
//! - [`rules::CrudValidator`] and [`rules::FieldRules`]: rule inference
//! - [`Availability`]: term validation and overlap checks
//! - [`Settings`]: cached inn-wide settings (check-in time, booking window)
//! - [`Error`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use ryokan::rules::{CrudValidator, Mode, NoFilter, Targets};
//! use ryokan::schema::{Column, LogicalType, SchemaCatalog};
//!
//! let mut catalog = SchemaCatalog::new();
//! catalog.insert_table(
//!     "rooms",
//!     vec![
//!         Column::new("id", LogicalType::Int).unsigned(),
//!         Column::new("name", LogicalType::String).with_length(100),
//!         Column::new("price", LogicalType::Int).unsigned(),
//!     ],
//! );
//!
//! let validator = CrudValidator::new(&catalog, Mode::Create);
//! let rules = validator.rules(&Targets::new("rooms"), &NoFilter).unwrap();
//! assert_eq!(
//!     rules.get("rooms.name").unwrap().to_string(),
//!     "required|max:100|string",
//! );
//! ```

pub mod availability;
pub mod clock;
pub mod database;
pub mod error;
pub mod logging;
pub mod model;
pub mod naming;
pub mod reservation;
pub mod rules;
pub mod schema;
pub mod settings;

// Re-export key types at crate root for convenience
pub use availability::{Availability, OwnerKey, ReservationStore};
pub use clock::{Clock, FixedClock, SystemClock};
pub use database::{Database, DatabaseConfig};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use model::{Guest, Room};
pub use reservation::Reservation;
pub use schema::{Column, LogicalType, SchemaCatalog, SchemaProvider};
pub use settings::{InMemorySettings, Settings, SettingsStore};
