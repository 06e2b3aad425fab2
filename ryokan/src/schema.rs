//! Schema metadata types and the schema collaborator trait.
//!
//! The rule inference engine never talks to a database directly; it
//! consumes [`Column`] metadata supplied by a [`SchemaProvider`]. Two
//! providers ship with this crate: a YAML-backed [`SchemaCatalog`] for
//! schemas described on disk, and live `SQLite` introspection on
//! [`crate::database::Database`].

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::naming;

/// Normalized category collapsing the underlying column storage types.
///
/// Storage engines expose many concrete types (`BIGINT`, `SMALLINT`,
/// `VARCHAR`, `TEXT`, ...); rule inference only cares about this
/// normalized category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalType {
    /// Boolean flags.
    Boolean,
    /// Integer types of any width.
    Int,
    /// Floating point and decimal types.
    Numeric,
    /// Calendar dates and timestamps.
    Date,
    /// Time-of-day values.
    Time,
    /// Character and text types.
    String,
    /// Anything the mapper does not recognize.
    Other,
}

impl Default for LogicalType {
    fn default() -> Self {
        Self::Other
    }
}

/// Column metadata for a single table column.
///
/// # Examples
///
/// ```
/// use ryokan::schema::{Column, LogicalType};
///
/// let column = Column::new("name", LogicalType::String).with_length(255);
/// assert_eq!(column.name, "name");
/// assert_eq!(column.length, Some(255));
/// assert!(!column.nullable);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// The column name.
    pub name: String,
    /// The normalized column type.
    #[serde(rename = "type", default)]
    pub logical_type: LogicalType,
    /// Whether NULL values are permitted.
    #[serde(default)]
    pub nullable: bool,
    /// Whether the column declares a default value.
    #[serde(default)]
    pub has_default: bool,
    /// Declared maximum length, when the type carries one.
    #[serde(default)]
    pub length: Option<u32>,
    /// Whether the column is declared unsigned.
    #[serde(default)]
    pub unsigned: bool,
}

impl Column {
    /// Creates a non-nullable column of the given type with no length,
    /// no default, and signed values.
    #[must_use]
    pub fn new(name: impl Into<String>, logical_type: LogicalType) -> Self {
        Self {
            name: name.into(),
            logical_type,
            nullable: false,
            has_default: false,
            length: None,
            unsigned: false,
        }
    }

    /// Marks the column as nullable.
    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Marks the column as carrying a default value.
    #[must_use]
    pub const fn with_default(mut self) -> Self {
        self.has_default = true;
        self
    }

    /// Sets the declared maximum length.
    #[must_use]
    pub const fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    /// Marks the column as unsigned.
    #[must_use]
    pub const fn unsigned(mut self) -> Self {
        self.unsigned = true;
        self
    }
}

/// The schema collaborator consumed by the rule inference engine.
///
/// Implementations supply column metadata synchronously; the engine
/// issues one lookup per target and does not assume batching.
pub trait SchemaProvider {
    /// Lists the columns of a table, in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when the table has no resolvable
    /// schema metadata.
    fn columns(&self, table: &str) -> Result<Vec<Column>>;

    /// Resolves an entity identifier (singular) to its table name.
    ///
    /// The default implementation follows the plural snake_case table
    /// naming convention.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when the entity cannot be
    /// resolved.
    fn table_name(&self, entity: &str) -> Result<String> {
        Ok(naming::pluralize(entity))
    }
}

/// A schema catalog described in a YAML document.
///
/// The catalog maps table names to column lists and is the file-based
/// [`SchemaProvider`]. Tables are stored sorted by name so iteration and
/// serialization are deterministic.
///
/// # Examples
///
/// ```
/// use ryokan::schema::{SchemaCatalog, SchemaProvider};
///
/// let yaml = r#"
/// tables:
///   rooms:
///     - { name: name, type: string, length: 255 }
///     - { name: price, type: int, unsigned: true }
/// "#;
/// let catalog = SchemaCatalog::from_yaml(yaml).unwrap();
/// assert_eq!(catalog.columns("rooms").unwrap().len(), 2);
/// assert!(catalog.columns("missing").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaCatalog {
    /// Table name to ordered column metadata.
    pub tables: BTreeMap<String, Vec<Column>>,
}

impl SchemaCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a catalog from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Loads a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Adds or replaces a table definition.
    pub fn insert_table(&mut self, table: impl Into<String>, columns: Vec<Column>) {
        self.tables.insert(table.into(), columns);
    }
}

impl SchemaProvider for SchemaCatalog {
    fn columns(&self, table: &str) -> Result<Vec<Column>> {
        self.tables
            .get(table)
            .cloned()
            .ok_or_else(|| Error::unknown_table(table))
    }
}
