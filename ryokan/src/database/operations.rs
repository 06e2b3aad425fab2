//! Database CRUD operations for rooms, guests, reservations, and settings.
//!
//! Dates are stored as ISO-8601 text (`YYYY-MM-DD`), times as `HH:MM:SS`.
//! Reservations are never physically deleted; cancellation sets
//! `deleted_at` and every read filters on `deleted_at IS NULL`.

use chrono::{NaiveDate, NaiveTime};
use rusqlite::{params, OptionalExtension, TransactionBehavior};

use crate::availability::{OwnerKey, ReservationStore};
use crate::error::{Error, Result};
use crate::settings::SettingsStore;
use crate::{Guest, Reservation, Room};

use super::connection::Database;
use super::schema::{DELETE_RESERVATION, INSERT_RESERVATION};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

fn parse_date(value: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

fn parse_time(value: &str) -> rusqlite::Result<NaiveTime> {
    NaiveTime::parse_from_str(value, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

/// Helper function to deserialize a reservation from a database row.
///
/// Expects row fields in this order: id, `room_id`, `guest_id`,
/// `start_date`, `end_date`, checkout
fn row_to_reservation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reservation> {
    let id: i64 = row.get(0)?;
    let room_id: i64 = row.get(1)?;
    let guest_id: i64 = row.get(2)?;
    let start_date: String = row.get(3)?;
    let end_date: String = row.get(4)?;
    let checkout: Option<String> = row.get(5)?;

    let checkout = checkout.as_deref().map(parse_time).transpose()?;

    Ok(Reservation::builder(
        room_id,
        guest_id,
        parse_date(&start_date)?,
        parse_date(&end_date)?,
    )
    .id(id)
    .checkout(checkout)
    .build())
}

fn row_to_room(row: &rusqlite::Row<'_>) -> rusqlite::Result<Room> {
    Ok(Room {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        number: row.get(2)?,
        price: row.get(3)?,
    })
}

fn row_to_guest(row: &rusqlite::Row<'_>) -> rusqlite::Result<Guest> {
    Ok(Guest {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        name_kana: row.get(2)?,
        zip_code: row.get(3)?,
        address: row.get(4)?,
        phone: row.get(5)?,
    })
}

/// Maps a well-known setting key to the `type` column value.
fn setting_kind(key: &str) -> &'static str {
    match key {
        crate::settings::MAX_DAY => "int",
        crate::settings::CHECKIN | crate::settings::CHECKOUT => "time",
        _ => "string",
    }
}

impl Database {
    /// Inserts a room and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use ryokan::database::{Database, DatabaseConfig};
    /// use ryokan::Room;
    ///
    /// let config = DatabaseConfig::new("/tmp/ryokan.db");
    /// let mut db = Database::open(config).unwrap();
    ///
    /// let room = db.insert_room(&Room::new("Fuji", 2, 12000)).unwrap();
    /// assert!(room.id.is_some());
    /// ```
    pub fn insert_room(&mut self, room: &Room) -> Result<Room> {
        self.conn.execute(
            "INSERT INTO rooms (name, number, price, created_at, updated_at)
             VALUES (?, ?, ?, datetime('now'), datetime('now'))",
            params![room.name, room.number, room.price],
        )?;

        let mut saved = room.clone();
        saved.id = Some(self.conn.last_insert_rowid());
        Ok(saved)
    }

    /// Inserts a guest and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_guest(&mut self, guest: &Guest) -> Result<Guest> {
        self.conn.execute(
            "INSERT INTO guests
             (name, name_kana, zip_code, address, phone, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, datetime('now'), datetime('now'))",
            params![
                guest.name,
                guest.name_kana,
                guest.zip_code,
                guest.address,
                guest.phone,
            ],
        )?;

        let mut saved = guest.clone();
        saved.id = Some(self.conn.last_insert_rowid());
        Ok(saved)
    }

    /// Inserts a reservation and returns it with its assigned id.
    ///
    /// The insert runs in an IMMEDIATE transaction, taking the write
    /// lock before the statement executes. Any availability check a
    /// caller performed beforehand ran outside this transaction and can
    /// still race another writer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The referenced room or guest does not exist
    /// - The transaction cannot be started or committed
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use chrono::NaiveDate;
    /// use ryokan::database::{Database, DatabaseConfig};
    /// use ryokan::{Guest, Reservation, Room};
    ///
    /// let config = DatabaseConfig::new("/tmp/ryokan.db");
    /// let mut db = Database::open(config).unwrap();
    ///
    /// let room = db.insert_room(&Room::new("Fuji", 2, 12000)).unwrap();
    /// let guest = db.insert_guest(&Guest::new("Sato")).unwrap();
    ///
    /// let start = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
    /// let end = NaiveDate::from_ymd_opt(2026, 9, 3).unwrap();
    /// let reservation =
    ///     Reservation::builder(room.id.unwrap(), guest.id.unwrap(), start, end).build();
    ///
    /// let saved = db.insert_reservation(&reservation).unwrap();
    /// assert!(saved.id().is_some());
    /// ```
    pub fn insert_reservation(&mut self, reservation: &Reservation) -> Result<Reservation> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute(
            INSERT_RESERVATION,
            params![
                reservation.room_id(),
                reservation.guest_id(),
                reservation.start_date().format(DATE_FORMAT).to_string(),
                reservation.end_date().format(DATE_FORMAT).to_string(),
                reservation
                    .checkout()
                    .map(|t| t.format(TIME_FORMAT).to_string()),
            ],
        )?;

        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(Reservation::builder(
            reservation.room_id(),
            reservation.guest_id(),
            reservation.start_date(),
            reservation.end_date(),
        )
        .id(id)
        .checkout(reservation.checkout())
        .build())
    }

    /// Looks up an active reservation by id.
    ///
    /// Cancelled reservations are not returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_reservation(&self, id: i64) -> Result<Option<Reservation>> {
        self.conn
            .query_row(
                "SELECT id, room_id, guest_id, start_date, end_date, checkout
                 FROM reservations
                 WHERE id = ? AND deleted_at IS NULL",
                [id],
                row_to_reservation,
            )
            .optional()
            .map_err(Error::from)
    }

    /// Looks up a room by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_room(&self, id: i64) -> Result<Option<Room>> {
        self.conn
            .query_row(
                "SELECT id, name, number, price FROM rooms WHERE id = ?",
                [id],
                row_to_room,
            )
            .optional()
            .map_err(Error::from)
    }

    /// Looks up a guest by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_guest(&self, id: i64) -> Result<Option<Guest>> {
        self.conn
            .query_row(
                "SELECT id, name, name_kana, zip_code, address, phone
                 FROM guests WHERE id = ?",
                [id],
                row_to_guest,
            )
            .optional()
            .map_err(Error::from)
    }

    /// Lists all active reservations ordered by start date, then id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reservations(&self) -> Result<Vec<Reservation>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, room_id, guest_id, start_date, end_date, checkout
             FROM reservations
             WHERE deleted_at IS NULL
             ORDER BY start_date, id",
        )?;

        let rows = stmt.query_map([], row_to_reservation)?;
        let mut reservations = Vec::new();
        for row in rows {
            reservations.push(row?);
        }
        Ok(reservations)
    }

    /// Lists all rooms ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_rooms(&self) -> Result<Vec<Room>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, number, price FROM rooms ORDER BY id")?;

        let rows = stmt.query_map([], row_to_room)?;
        let mut rooms = Vec::new();
        for row in rows {
            rooms.push(row?);
        }
        Ok(rooms)
    }

    /// Lists all guests ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_guests(&self) -> Result<Vec<Guest>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, name_kana, zip_code, address, phone
             FROM guests ORDER BY id",
        )?;

        let rows = stmt.query_map([], row_to_guest)?;
        let mut guests = Vec::new();
        for row in rows {
            guests.push(row?);
        }
        Ok(guests)
    }

    /// Cancels a reservation by soft-deleting it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no active reservation has the id,
    /// or a database error if the update fails.
    pub fn cancel_reservation(&mut self, id: i64) -> Result<()> {
        let affected = self.conn.execute(DELETE_RESERVATION, [id])?;
        if affected == 0 {
            return Err(Error::NotFound {
                resource: format!("reservation {id}"),
            });
        }
        log::debug!("cancelled reservation {id}");
        Ok(())
    }

    /// Reads a raw setting value.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_setting(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?",
                [key],
                |row| row.get(0),
            )
            .optional()
            .map_err(Error::from)
    }

    /// Writes a setting value, replacing any existing value.
    ///
    /// Callers holding a [`crate::Settings`] cache over this database
    /// must invalidate it afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn set_setting(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO settings (key, value, type) VALUES (?, ?, ?)",
            params![key, value, setting_kind(key)],
        )?;
        log::debug!("setting {key} = {value}");
        Ok(())
    }
}

impl SettingsStore for &Database {
    fn load(&self, key: &str) -> Result<Option<String>> {
        self.get_setting(key)
    }
}

impl ReservationStore for Database {
    /// Reports whether an active reservation for the owner overlaps the
    /// inclusive date range, excluding the reservation `exclude_id`.
    fn overlapping_exists(
        &self,
        owner: OwnerKey,
        exclude_id: Option<i64>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<bool> {
        let (column, owner_id) = match owner {
            OwnerKey::Room(id) => ("room_id", id),
            OwnerKey::Guest(id) => ("guest_id", id),
        };

        // ISO text dates compare correctly with lexical ordering.
        let sql = format!(
            "SELECT EXISTS(
                 SELECT 1 FROM reservations
                 WHERE deleted_at IS NULL
                   AND {column} = ?1
                   AND (?2 IS NULL OR id != ?2)
                   AND start_date <= ?4
                   AND end_date >= ?3
             )"
        );

        let exists: bool = self.conn.query_row(
            &sql,
            params![
                owner_id,
                exclude_id,
                start.format(DATE_FORMAT).to_string(),
                end.format(DATE_FORMAT).to_string(),
            ],
            |row| row.get(0),
        )?;
        Ok(exists)
    }
}
