//! Reservation availability and booking-window policy checks.
//!
//! Every check here is a pure function of its arguments plus two pieces
//! of external state: the business settings and the current time, both
//! injected as collaborators. Policy violations (an overlap, a term
//! outside the advance-booking window) are reported as `false`, never
//! as errors.

use chrono::{Days, NaiveDate, NaiveTime};

use crate::clock::Clock;
use crate::error::Result;
use crate::settings::{Settings, SettingsStore};

/// The scope of an overlap query: the resource or the booking guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerKey {
    /// Overlaps against other reservations for the same room.
    Room(i64),
    /// Overlaps against the same guest's other reservations.
    Guest(i64),
}

/// The reservation persistence collaborator.
///
/// Implementations answer existence queries over *active* reservations
/// (soft-deleted rows do not count) using the inclusive overlap
/// predicate: an existing reservation overlaps `[start, end]` iff
/// `existing.start <= end && existing.end >= start`.
pub trait ReservationStore {
    /// Returns true when an active reservation overlapping the range
    /// exists for the owner, ignoring the reservation with id
    /// `exclude_id` (used when re-validating an in-place edit).
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying query fails.
    fn overlapping_exists(
        &self,
        owner: OwnerKey,
        exclude_id: Option<i64>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<bool>;
}

/// The availability engine.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use ryokan::{Availability, FixedClock, InMemorySettings, OwnerKey, Settings};
/// use ryokan::availability::ReservationStore;
///
/// struct EmptyStore;
/// impl ReservationStore for EmptyStore {
///     fn overlapping_exists(
///         &self,
///         _owner: OwnerKey,
///         _exclude_id: Option<i64>,
///         _start: NaiveDate,
///         _end: NaiveDate,
///     ) -> ryokan::Result<bool> {
///         Ok(false)
///     }
/// }
///
/// let settings = Settings::new(InMemorySettings::new());
/// let today = NaiveDate::from_ymd_opt(2026, 8, 29).unwrap();
/// let clock = FixedClock::new(today.and_hms_opt(9, 0, 0).unwrap());
/// let engine = Availability::new(&EmptyStore, &settings, &clock);
///
/// assert!(engine
///     .is_reservation_available(None, Some(1), Some(today), Some(today))
///     .unwrap());
/// ```
pub struct Availability<'a, S: SettingsStore> {
    store: &'a dyn ReservationStore,
    settings: &'a Settings<S>,
    clock: &'a dyn Clock,
}

impl<'a, S: SettingsStore> Availability<'a, S> {
    /// Creates an engine over the three collaborators.
    pub fn new(
        store: &'a dyn ReservationStore,
        settings: &'a Settings<S>,
        clock: &'a dyn Clock,
    ) -> Self {
        Self {
            store,
            settings,
            clock,
        }
    }

    /// Checks a proposed term against ordering and the advance-booking
    /// window.
    ///
    /// Rules, in order:
    ///
    /// - `start > end` (both present) is invalid regardless of policy.
    /// - A supplied per-call `cutoff` later than the check-in setting is
    ///   invalid; equal-or-earlier passes and anchors the window at
    ///   today.
    /// - A `max_day` of 0 means an unlimited window; an open `end` bound
    ///   is always within the window.
    /// - Otherwise the term is valid iff `end <= today + max_day`, where
    ///   today advances by one day once the wall clock reaches the
    ///   check-in cutoff (pre-empted by a supplied `cutoff`).
    ///
    /// # Errors
    ///
    /// Returns an error if a settings read fails or a stored setting is
    /// malformed.
    pub fn is_term_valid(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        cutoff: Option<NaiveTime>,
    ) -> Result<bool> {
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Ok(false);
            }
        }

        let checkin = self.settings.checkin()?;
        if let Some(cutoff) = cutoff {
            if cutoff > checkin {
                log::debug!("term rejected: cutoff {cutoff} is past check-in {checkin}");
                return Ok(false);
            }
        }

        let max_day = self.settings.max_day()?;
        if max_day <= 0 {
            return Ok(true);
        }
        let Some(end) = end else {
            return Ok(true);
        };

        let now = self.clock.now();
        let mut today = now.date();
        if cutoff.is_none() && now.time() >= checkin {
            today = today.checked_add_days(Days::new(1)).unwrap_or(today);
        }

        #[allow(clippy::cast_sign_loss)]
        let deadline = today
            .checked_add_days(Days::new(max_day as u64))
            .unwrap_or(today);
        Ok(end <= deadline)
    }

    /// Checks that no other active reservation for the room overlaps the
    /// proposed range.
    ///
    /// A missing room or an open bound makes the check trivially pass;
    /// `exclude_id` removes the reservation being edited from the
    /// comparison set.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails.
    pub fn is_reservation_available(
        &self,
        exclude_id: Option<i64>,
        room_id: Option<i64>,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<bool> {
        let (Some(room_id), Some(start), Some(end)) = (room_id, start, end) else {
            return Ok(true);
        };
        let overlap =
            self.store
                .overlapping_exists(OwnerKey::Room(room_id), exclude_id, start, end)?;
        Ok(!overlap)
    }

    /// Checks that the guest holds no other active reservation
    /// overlapping the proposed range, regardless of room.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails.
    pub fn is_not_duplicated(
        &self,
        exclude_id: Option<i64>,
        guest_id: Option<i64>,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<bool> {
        let (Some(guest_id), Some(start), Some(end)) = (guest_id, start, end) else {
            return Ok(true);
        };
        let overlap =
            self.store
                .overlapping_exists(OwnerKey::Guest(guest_id), exclude_id, start, end)?;
        Ok(!overlap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::settings::{InMemorySettings, CHECKIN, MAX_DAY};

    /// In-memory store over `(id, owner pair, range)` rows.
    struct FakeStore {
        rows: Vec<(i64, i64, i64, NaiveDate, NaiveDate)>,
    }

    impl FakeStore {
        fn new(rows: Vec<(i64, i64, i64, NaiveDate, NaiveDate)>) -> Self {
            Self { rows }
        }
    }

    impl ReservationStore for FakeStore {
        fn overlapping_exists(
            &self,
            owner: OwnerKey,
            exclude_id: Option<i64>,
            start: NaiveDate,
            end: NaiveDate,
        ) -> Result<bool> {
            Ok(self.rows.iter().any(|(id, room, guest, s, e)| {
                if exclude_id == Some(*id) {
                    return false;
                }
                let matches_owner = match owner {
                    OwnerKey::Room(room_id) => *room == room_id,
                    OwnerKey::Guest(guest_id) => *guest == guest_id,
                };
                matches_owner && *s <= end && *e >= start
            }))
        }
    }

    fn day(offset: u64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 9, 1)
            .unwrap()
            .checked_add_days(Days::new(offset))
            .unwrap()
    }

    fn morning_clock() -> FixedClock {
        FixedClock::new(day(0).and_hms_opt(9, 0, 0).unwrap())
    }

    #[test]
    fn test_term_valid_within_window() {
        let store = FakeStore::new(vec![]);
        let settings = Settings::new(InMemorySettings::new().with(MAX_DAY, "4"));
        let clock = morning_clock();
        let engine = Availability::new(&store, &settings, &clock);

        assert!(engine.is_term_valid(Some(day(0)), Some(day(0)), None).unwrap());
        assert!(engine.is_term_valid(Some(day(0)), Some(day(4)), None).unwrap());
        assert!(!engine.is_term_valid(Some(day(0)), Some(day(5)), None).unwrap());
    }

    #[test]
    fn test_term_invalid_when_start_after_end() {
        let store = FakeStore::new(vec![]);
        let settings = Settings::new(InMemorySettings::new().with(MAX_DAY, "4"));
        let clock = morning_clock();
        let engine = Availability::new(&store, &settings, &clock);

        assert!(!engine.is_term_valid(Some(day(1)), Some(day(0)), None).unwrap());
    }

    #[test]
    fn test_term_open_bounds_are_valid() {
        let store = FakeStore::new(vec![]);
        let settings = Settings::new(InMemorySettings::new().with(MAX_DAY, "4"));
        let clock = morning_clock();
        let engine = Availability::new(&store, &settings, &clock);

        assert!(engine.is_term_valid(None, Some(day(0)), None).unwrap());
        assert!(engine.is_term_valid(Some(day(0)), None, None).unwrap());
        assert!(engine.is_term_valid(None, None, None).unwrap());
    }

    #[test]
    fn test_term_unlimited_window() {
        let store = FakeStore::new(vec![]);
        let settings = Settings::new(InMemorySettings::new().with(MAX_DAY, "0"));
        let clock = morning_clock();
        let engine = Availability::new(&store, &settings, &clock);

        assert!(engine.is_term_valid(Some(day(0)), Some(day(400)), None).unwrap());
        // Ordering still applies
        assert!(!engine.is_term_valid(Some(day(1)), Some(day(0)), None).unwrap());
    }

    #[test]
    fn test_term_cutoff_against_checkin() {
        let store = FakeStore::new(vec![]);
        let settings = Settings::new(
            InMemorySettings::new()
                .with(MAX_DAY, "0")
                .with(CHECKIN, "15:00"),
        );
        let clock = morning_clock();
        let engine = Availability::new(&store, &settings, &clock);

        let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
        assert!(engine.is_term_valid(Some(day(0)), Some(day(0)), None).unwrap());
        assert!(engine
            .is_term_valid(Some(day(0)), Some(day(0)), Some(t(15, 0)))
            .unwrap());
        assert!(!engine
            .is_term_valid(Some(day(0)), Some(day(0)), Some(t(15, 1)))
            .unwrap());
    }

    #[test]
    fn test_term_day_advances_at_checkin() {
        let store = FakeStore::new(vec![]);
        let settings = Settings::new(
            InMemorySettings::new()
                .with(MAX_DAY, "4")
                .with(CHECKIN, "15:00"),
        );

        // Before the cutoff the window ends at day(4)
        let clock = FixedClock::new(day(0).and_hms_opt(14, 59, 59).unwrap());
        let engine = Availability::new(&store, &settings, &clock);
        assert!(!engine.is_term_valid(Some(day(0)), Some(day(5)), None).unwrap());

        // At the cutoff the anchor day advances, admitting day(5)
        let clock = FixedClock::new(day(0).and_hms_opt(15, 0, 0).unwrap());
        let engine = Availability::new(&store, &settings, &clock);
        assert!(engine.is_term_valid(Some(day(0)), Some(day(5)), None).unwrap());
        assert!(!engine.is_term_valid(Some(day(0)), Some(day(6)), None).unwrap());

        // A supplied cutoff pre-empts the shift
        let t = NaiveTime::from_hms_opt(15, 0, 0).unwrap();
        assert!(!engine
            .is_term_valid(Some(day(0)), Some(day(5)), Some(t))
            .unwrap());
    }

    #[test]
    fn test_availability_scenario() {
        // Existing reservation for room 1, guest 1 over [day3, day4]
        let store = FakeStore::new(vec![(10, 1, 1, day(2), day(3))]);
        let settings = Settings::new(InMemorySettings::new());
        let clock = morning_clock();
        let engine = Availability::new(&store, &settings, &clock);

        let room = Some(1);
        let other_room = Some(2);

        // [day1, day2]: clear of [day3, day4]
        assert!(engine
            .is_reservation_available(None, room, Some(day(0)), Some(day(1)))
            .unwrap());
        // [day2, day3]: shares day3
        assert!(!engine
            .is_reservation_available(None, room, Some(day(1)), Some(day(2)))
            .unwrap());
        // [day3, day4]: identical
        assert!(!engine
            .is_reservation_available(None, room, Some(day(2)), Some(day(3)))
            .unwrap());
        // [day4, day5]: shares day4
        assert!(!engine
            .is_reservation_available(None, room, Some(day(3)), Some(day(4)))
            .unwrap());
        // [day5, day6]: clear again
        assert!(engine
            .is_reservation_available(None, room, Some(day(4)), Some(day(5)))
            .unwrap());
        // [day2, day5]: envelops the existing range
        assert!(!engine
            .is_reservation_available(None, room, Some(day(1)), Some(day(4)))
            .unwrap());
        // Excluding the existing reservation admits the edit
        assert!(engine
            .is_reservation_available(Some(10), room, Some(day(1)), Some(day(4)))
            .unwrap());
        // A different room never conflicts
        assert!(engine
            .is_reservation_available(None, other_room, Some(day(1)), Some(day(4)))
            .unwrap());
    }

    #[test]
    fn test_availability_trivial_cases() {
        let store = FakeStore::new(vec![(10, 1, 1, day(2), day(3))]);
        let settings = Settings::new(InMemorySettings::new());
        let clock = morning_clock();
        let engine = Availability::new(&store, &settings, &clock);

        assert!(engine
            .is_reservation_available(None, None, Some(day(2)), Some(day(3)))
            .unwrap());
        assert!(engine
            .is_reservation_available(None, Some(1), None, Some(day(3)))
            .unwrap());
        assert!(engine
            .is_reservation_available(None, Some(1), Some(day(2)), None)
            .unwrap());
    }

    #[test]
    fn test_duplicate_guard_scoped_by_guest() {
        let store = FakeStore::new(vec![(10, 1, 1, day(2), day(3))]);
        let settings = Settings::new(InMemorySettings::new());
        let clock = morning_clock();
        let engine = Availability::new(&store, &settings, &clock);

        let guest = Some(1);
        assert!(engine
            .is_not_duplicated(None, guest, Some(day(0)), Some(day(1)))
            .unwrap());
        assert!(!engine
            .is_not_duplicated(None, guest, Some(day(1)), Some(day(2)))
            .unwrap());
        assert!(!engine
            .is_not_duplicated(None, guest, Some(day(3)), Some(day(4)))
            .unwrap());
        assert!(engine
            .is_not_duplicated(None, guest, Some(day(4)), Some(day(5)))
            .unwrap());
        assert!(!engine
            .is_not_duplicated(None, guest, Some(day(1)), Some(day(4)))
            .unwrap());
        assert!(engine
            .is_not_duplicated(Some(10), guest, Some(day(1)), Some(day(4)))
            .unwrap());
        // A different guest may overlap in a different room
        assert!(engine
            .is_not_duplicated(None, Some(2), Some(day(1)), Some(day(4)))
            .unwrap());
        // Trivial cases
        assert!(engine.is_not_duplicated(None, None, Some(day(0)), Some(day(0))).unwrap());
        assert!(engine.is_not_duplicated(None, guest, None, Some(day(0))).unwrap());
        assert!(engine.is_not_duplicated(None, guest, Some(day(0)), None).unwrap());
    }
}
