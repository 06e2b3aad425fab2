//! Common test utilities for integration tests.
//!
//! This module provides helper functions and fixture builders for testing
//! the ryokan library.

use chrono::NaiveDate;
use tempfile::TempDir;

use ryokan::database::{Database, DatabaseConfig};
use ryokan::{Guest, Reservation, Room};

/// Creates a test database in a temporary location.
///
/// The returned `TempDir` keeps the file alive for the test's duration.
#[allow(dead_code)]
pub fn open_test_database() -> (Database, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let config = DatabaseConfig::new(dir.path().join("test.db"));
    let db = Database::open(config).unwrap();
    (db, dir)
}

/// Shorthand date constructor.
#[allow(dead_code)]
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Inserts a room and guest, then a reservation between the given dates.
///
/// Returns the saved reservation with its assigned ids.
#[allow(dead_code)]
pub fn seed_reservation(db: &mut Database, start: NaiveDate, end: NaiveDate) -> Reservation {
    let room = db.insert_room(&Room::new("Fuji", 2, 12000)).unwrap();
    let guest = db.insert_guest(&Guest::new("Sato Taro")).unwrap();
    let reservation =
        Reservation::builder(room.id.unwrap(), guest.id.unwrap(), start, end).build();
    db.insert_reservation(&reservation).unwrap()
}
