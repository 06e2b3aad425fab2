//! Master-data models: rooms and guests.
//!
//! These carry no behavior of their own; validation rules for their
//! fields are inferred from schema metadata by [`crate::rules`], and
//! reservation logic lives in [`crate::reservation`] and
//! [`crate::availability`].

use serde::{Deserialize, Serialize};

/// A guest room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Persistent id, `None` until saved.
    pub id: Option<i64>,
    /// Display name.
    pub name: String,
    /// Guest capacity.
    pub number: u32,
    /// Price per night.
    pub price: i64,
}

impl Room {
    /// Creates an unsaved room.
    #[must_use]
    pub fn new(name: impl Into<String>, number: u32, price: i64) -> Self {
        Self {
            id: None,
            name: name.into(),
            number,
            price,
        }
    }
}

/// A guest record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    /// Persistent id, `None` until saved.
    pub id: Option<i64>,
    /// Full name.
    pub name: String,
    /// Katakana reading of the name.
    pub name_kana: Option<String>,
    /// Postal code.
    pub zip_code: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
}

impl Guest {
    /// Creates an unsaved guest with only a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            name_kana: None,
            zip_code: None,
            address: None,
            phone: None,
        }
    }
}
