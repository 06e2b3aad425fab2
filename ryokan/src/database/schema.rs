//! Database schema definitions and SQL constants.
//!
//! Column declarations deliberately carry `VARCHAR(n)` lengths and
//! `UNSIGNED` markers: `SQLite` treats them as type-affinity hints only,
//! but live introspection recovers them as rule-inference metadata.

/// Current schema version for the database.
///
/// Stored in the metadata table and checked on every open.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the guests table.
pub const CREATE_GUESTS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS guests (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name VARCHAR(255) NOT NULL,
        name_kana VARCHAR(255),
        zip_code VARCHAR(8),
        address VARCHAR(255),
        phone VARCHAR(20),
        created_at DATETIME NOT NULL,
        updated_at DATETIME NOT NULL,
        deleted_at DATETIME
    )";

/// SQL statement to create the rooms table.
pub const CREATE_ROOMS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS rooms (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name VARCHAR(100) NOT NULL,
        number INT UNSIGNED NOT NULL,
        price INT UNSIGNED NOT NULL,
        created_at DATETIME NOT NULL,
        updated_at DATETIME NOT NULL,
        deleted_at DATETIME
    )";

/// SQL statement to create the reservations table.
///
/// Dates are stored as ISO `YYYY-MM-DD` text so lexical comparison
/// matches date order; `deleted_at` implements soft deletion.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        room_id INT UNSIGNED NOT NULL,
        guest_id INT UNSIGNED NOT NULL,
        start_date DATE NOT NULL,
        end_date DATE NOT NULL,
        checkout TIME,
        created_at DATETIME NOT NULL,
        updated_at DATETIME NOT NULL,
        deleted_at DATETIME
    )";

/// SQL statement to create the settings table.
pub const CREATE_SETTINGS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS settings (
        key VARCHAR(50) PRIMARY KEY NOT NULL,
        value VARCHAR(255) NOT NULL,
        type VARCHAR(10) NOT NULL
    )";

/// Index speeding up per-room overlap queries.
pub const CREATE_RESERVATION_ROOM_INDEX: &str = r"
    CREATE INDEX IF NOT EXISTS idx_reservations_room
    ON reservations(room_id, start_date, end_date)";

/// Index speeding up per-guest duplicate-booking queries.
pub const CREATE_RESERVATION_GUEST_INDEX: &str = r"
    CREATE INDEX IF NOT EXISTS idx_reservations_guest
    ON reservations(guest_id, start_date, end_date)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// SQL statement to insert a reservation.
pub const INSERT_RESERVATION: &str = r"
    INSERT INTO reservations
    (room_id, guest_id, start_date, end_date, checkout, created_at, updated_at)
    VALUES (?, ?, ?, ?, ?, datetime('now'), datetime('now'))
";

/// SQL statement to soft-delete a reservation.
pub const DELETE_RESERVATION: &str = r"
    UPDATE reservations
    SET deleted_at = datetime('now'), updated_at = datetime('now')
    WHERE id = ? AND deleted_at IS NULL
";
