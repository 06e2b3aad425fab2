//! Business settings with an explicitly invalidated cache.
//!
//! Settings are process-wide mutable state stored by a collaborator
//! (typically the `settings` table). Reads go through a cache with no
//! TTL; after writing a setting, the writer must call
//! [`Settings::invalidate`] or other readers may observe stale values.
//! That responsibility is the writer's, not this module's.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::NaiveTime;

use crate::error::{Error, Result};

/// Key for the maximum advance-booking window, in days. `0` = unlimited.
pub const MAX_DAY: &str = "max_day";

/// Key for the check-in cutoff time of day.
pub const CHECKIN: &str = "checkin";

/// Key for the default check-out time of day.
pub const CHECKOUT: &str = "checkout";

/// Default check-in cutoff when the setting is absent.
const DEFAULT_CHECKIN: (u32, u32) = (15, 0);

/// Default check-out time when the setting is absent.
const DEFAULT_CHECKOUT: (u32, u32) = (10, 0);

/// The settings persistence collaborator.
pub trait SettingsStore {
    /// Loads the raw stored value for a key, or `None` when unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage read fails.
    fn load(&self, key: &str) -> Result<Option<String>>;
}

/// A static set of settings values, mainly for tests and defaults.
///
/// # Examples
///
/// ```
/// use ryokan::settings::{InMemorySettings, Settings, MAX_DAY};
///
/// let store = InMemorySettings::new().with(MAX_DAY, "4");
/// let settings = Settings::new(store);
/// assert_eq!(settings.max_day().unwrap(), 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemorySettings {
    values: HashMap<String, String>,
}

impl InMemorySettings {
    /// Creates an empty store; every lookup falls back to defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl SettingsStore for InMemorySettings {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }
}

/// Cached read access to business settings.
///
/// The cache holds raw values (including "known absent") until
/// [`Settings::invalidate`] is called. The interior `Mutex` makes the
/// cache safe to share between readers; it does not serialize writers,
/// which must coordinate through the storage layer's own transactions.
pub struct Settings<S: SettingsStore> {
    store: S,
    cache: Mutex<HashMap<String, Option<String>>>,
}

impl<S: SettingsStore> Settings<S> {
    /// Creates a settings view over a store with an empty cache.
    pub fn new(store: S) -> Self {
        Self {
            store,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the raw value for a key, caching the lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage read fails.
    ///
    /// # Panics
    ///
    /// Panics if the cache mutex is poisoned.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let mut cache = self.cache.lock().expect("settings cache poisoned");
        if let Some(cached) = cache.get(key) {
            return Ok(cached.clone());
        }
        let value = self.store.load(key)?;
        cache.insert(key.to_string(), value.clone());
        Ok(value)
    }

    /// Drops all cached values.
    ///
    /// Callers that write a setting must invalidate afterwards; there is
    /// no TTL.
    ///
    /// # Panics
    ///
    /// Panics if the cache mutex is poisoned.
    pub fn invalidate(&self) {
        self.cache.lock().expect("settings cache poisoned").clear();
        log::debug!("settings cache invalidated");
    }

    /// The maximum advance-booking window in days; `0` means unlimited.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the stored value is not an
    /// integer.
    pub fn max_day(&self) -> Result<i64> {
        match self.get(MAX_DAY)? {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| Error::validation(MAX_DAY, format!("not an integer: {raw}"))),
            None => Ok(0),
        }
    }

    /// The check-in cutoff time of day.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the stored value is not a time.
    pub fn checkin(&self) -> Result<NaiveTime> {
        self.time_setting(CHECKIN, DEFAULT_CHECKIN)
    }

    /// The default check-out time of day.
    ///
    /// A reservation's own checkout override takes precedence over this
    /// value; see [`crate::Reservation::occupancy`].
    ///
    /// # Errors
    ///
    /// Returns a validation error when the stored value is not a time.
    pub fn checkout(&self) -> Result<NaiveTime> {
        self.time_setting(CHECKOUT, DEFAULT_CHECKOUT)
    }

    fn time_setting(&self, key: &str, default: (u32, u32)) -> Result<NaiveTime> {
        match self.get(key)? {
            Some(raw) => parse_time(key, &raw),
            None => Ok(NaiveTime::from_hms_opt(default.0, default.1, 0)
                .expect("static default time is valid")),
        }
    }
}

/// Parses a stored time value, accepting `HH:MM` and `HH:MM:SS`.
///
/// # Errors
///
/// Returns a validation error for anything else.
pub fn parse_time(field: &str, raw: &str) -> Result<NaiveTime> {
    let trimmed = raw.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| Error::validation(field, format!("not a valid time: {raw}")))
}
