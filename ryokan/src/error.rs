//! Error types for the ryokan library.
//!
//! This module provides the error hierarchy for all operations in the
//! ryokan library, using `thiserror` for ergonomic error handling.
//!
//! Policy outcomes (an unavailable room, a term outside the booking
//! window) are *not* errors: the availability engine reports them as
//! boolean results because callers treat them as expected validation
//! outcomes. Errors are reserved for faults: unknown tables, malformed
//! stored values, database failures.

use thiserror::Error;

/// Result type alias for operations that may fail with a ryokan error.
///
/// # Examples
///
/// ```
/// use ryokan::{Error, Result};
///
/// fn example_operation() -> Result<i64> {
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the ryokan library.
#[derive(Debug, Error)]
pub enum Error {
    /// An entity or table has no resolvable schema metadata.
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },

    /// A field-level validation error (malformed date, time, or value).
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A schema catalog file could not be parsed.
    #[error("catalog error: {0}")]
    Catalog(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The requested resource was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },
}

impl Error {
    /// Creates a configuration error for an unknown table or entity.
    pub(crate) fn unknown_table(table: &str) -> Self {
        Self::Configuration {
            message: format!("no schema metadata for table [{table}]"),
        }
    }

    /// Creates a field-level validation error.
    pub(crate) fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Check if error indicates missing schema metadata or configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use ryokan::Error;
    ///
    /// let err = Error::Configuration { message: "no schema metadata for table [x]".into() };
    /// assert!(err.is_configuration());
    /// ```
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }

    /// Check if error is a field-level validation failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use ryokan::Error;
    ///
    /// let err = Error::Validation { field: "start_date".into(), message: "bad date".into() };
    /// assert!(err.is_validation());
    /// ```
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_display() {
        let err = Error::unknown_table("reservations");
        let display = format!("{err}");
        assert!(display.contains("configuration error"));
        assert!(display.contains("[reservations]"));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_validation_error_display() {
        let err = Error::validation("start_date", "not a valid date");
        let display = format!("{err}");
        assert!(display.contains("validation error"));
        assert!(display.contains("start_date"));
        assert!(display.contains("not a valid date"));
        assert!(err.is_validation());
    }

    #[test]
    fn test_not_found_error() {
        let err = Error::NotFound {
            resource: "reservation 7".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("not found"));
        assert!(display.contains("reservation 7"));
    }

    #[test]
    fn test_unsupported_schema_version_error() {
        let err = Error::UnsupportedSchemaVersion {
            expected: 1,
            found: 2,
        };
        let display = format!("{err}");
        assert!(display.contains("expected 1"));
        assert!(display.contains("found 2"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(format!("{err}").contains("I/O error"));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<i64> {
            Err(Error::unknown_table("nope"))
        }
        assert!(returns_result().is_err());
    }
}
