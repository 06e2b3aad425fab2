//! The reservation model and its tense derivation.
//!
//! A reservation holds a room for a guest over an inclusive date range.
//! Sub-day occupancy is bounded by the check-in setting on the first day
//! and by the checkout time (per-reservation override or the global
//! setting) on the morning after the last day; the tense accessors
//! classify a reservation against those boundaries.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::settings::{Settings, SettingsStore};

/// A room reservation.
///
/// `id` is `None` until the reservation is persisted. Date ordering is
/// deliberately not validated here: whether a term is acceptable is a
/// policy question answered by [`crate::Availability::is_term_valid`].
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use ryokan::Reservation;
///
/// let start = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2026, 9, 3).unwrap();
/// let reservation = Reservation::builder(1, 2, start, end).build();
/// assert_eq!(reservation.room_id(), 1);
/// assert_eq!(reservation.nights(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    id: Option<i64>,
    room_id: i64,
    guest_id: i64,
    start_date: NaiveDate,
    end_date: NaiveDate,
    checkout: Option<NaiveTime>,
}

impl Reservation {
    /// Creates a new reservation builder.
    #[must_use]
    pub const fn builder(
        room_id: i64,
        guest_id: i64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> ReservationBuilder {
        ReservationBuilder {
            id: None,
            room_id,
            guest_id,
            start_date,
            end_date,
            checkout: None,
        }
    }

    /// Returns the persistent id, when the reservation has been saved.
    #[must_use]
    pub const fn id(&self) -> Option<i64> {
        self.id
    }

    /// Returns the reserved room's id.
    #[must_use]
    pub const fn room_id(&self) -> i64 {
        self.room_id
    }

    /// Returns the booking guest's id.
    #[must_use]
    pub const fn guest_id(&self) -> i64 {
        self.guest_id
    }

    /// Returns the first occupied day.
    #[must_use]
    pub const fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Returns the last occupied day.
    #[must_use]
    pub const fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Returns the per-reservation checkout override, if any.
    #[must_use]
    pub const fn checkout(&self) -> Option<NaiveTime> {
        self.checkout
    }

    /// Number of occupied days (both ends inclusive).
    #[must_use]
    pub fn nights(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// Computes the sub-day occupancy boundaries.
    ///
    /// The start boundary is the start date at the check-in setting; the
    /// end boundary is the day after the end date, at this reservation's
    /// checkout override or the global check-out setting.
    ///
    /// # Errors
    ///
    /// Returns an error if a settings read fails or a stored setting is
    /// malformed.
    pub fn occupancy<S: SettingsStore>(
        &self,
        settings: &Settings<S>,
    ) -> Result<(NaiveDateTime, NaiveDateTime)> {
        let begins = self.start_date.and_time(settings.checkin()?);
        let checkout = match self.checkout {
            Some(time) => time,
            None => settings.checkout()?,
        };
        let ends = self
            .end_date
            .checked_add_days(Days::new(1))
            .unwrap_or(self.end_date)
            .and_time(checkout);
        Ok((begins, ends))
    }

    /// True when `now` is strictly after the occupancy end boundary.
    ///
    /// # Errors
    ///
    /// Returns an error if a settings read fails.
    pub fn is_past<S: SettingsStore>(
        &self,
        now: NaiveDateTime,
        settings: &Settings<S>,
    ) -> Result<bool> {
        let (_, ends) = self.occupancy(settings)?;
        Ok(now > ends)
    }

    /// True when `now` falls within the closed occupancy interval.
    ///
    /// # Errors
    ///
    /// Returns an error if a settings read fails.
    pub fn is_present<S: SettingsStore>(
        &self,
        now: NaiveDateTime,
        settings: &Settings<S>,
    ) -> Result<bool> {
        let (begins, ends) = self.occupancy(settings)?;
        Ok(now >= begins && now <= ends)
    }

    /// True when `now` is strictly before the occupancy start boundary.
    ///
    /// # Errors
    ///
    /// Returns an error if a settings read fails.
    pub fn is_future<S: SettingsStore>(
        &self,
        now: NaiveDateTime,
        settings: &Settings<S>,
    ) -> Result<bool> {
        let (begins, _) = self.occupancy(settings)?;
        Ok(now < begins)
    }
}

/// Builder for [`Reservation`] instances.
#[derive(Debug)]
pub struct ReservationBuilder {
    id: Option<i64>,
    room_id: i64,
    guest_id: i64,
    start_date: NaiveDate,
    end_date: NaiveDate,
    checkout: Option<NaiveTime>,
}

impl ReservationBuilder {
    /// Sets the persistent id (used when materializing stored rows).
    #[must_use]
    pub const fn id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets a per-reservation checkout time override.
    #[must_use]
    pub const fn checkout(mut self, checkout: Option<NaiveTime>) -> Self {
        self.checkout = checkout;
        self
    }

    /// Builds the reservation.
    #[must_use]
    pub const fn build(self) -> Reservation {
        Reservation {
            id: self.id,
            room_id: self.room_id,
            guest_id: self.guest_id,
            start_date: self.start_date,
            end_date: self.end_date,
            checkout: self.checkout,
        }
    }
}
