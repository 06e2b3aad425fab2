//! Shared test utilities for database unit tests.
//!
//! This module provides helper functions used across multiple database test modules.

use tempfile::{tempdir, TempDir};

use crate::database::{Database, DatabaseConfig};

/// Creates a temporary test database.
///
/// The returned [`TempDir`] keeps the backing file alive; dropping it
/// deletes the database.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
/// This is acceptable in test code where we want to fail fast.
#[must_use]
pub fn open_temp_database() -> (Database, TempDir) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let config = DatabaseConfig::new(path);
    let db = Database::open(config).unwrap();
    (db, dir)
}
