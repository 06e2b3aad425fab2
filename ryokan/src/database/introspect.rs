//! Live schema introspection.
//!
//! Implements [`SchemaProvider`] on top of `PRAGMA table_info` so
//! validation rules can be inferred directly from the open database,
//! without a YAML catalog. The DDL in [`super::schema`] declares
//! `VARCHAR(n)` and `INT UNSIGNED` precisely so that length and
//! signedness survive the round trip through `SQLite`.

use crate::error::{Error, Result};
use crate::schema::{Column, LogicalType, SchemaProvider};

use super::connection::Database;

/// Maps a declared column type to a logical type with length and
/// signedness metadata.
///
/// `SQLite` keeps the declared type verbatim, so this follows its own
/// affinity rules loosely: substring matching on the uppercased
/// declaration.
fn map_declared_type(declared: &str) -> (LogicalType, Option<u32>, bool) {
    let upper = declared.to_uppercase();

    if upper.contains("BOOL") {
        return (LogicalType::Boolean, None, false);
    }
    if upper.contains("INT") {
        return (LogicalType::Int, None, upper.contains("UNSIGNED"));
    }
    // DATETIME and TIMESTAMP carry a date, so check them before TIME
    if upper.contains("DATE") || upper.contains("TIMESTAMP") {
        return (LogicalType::Date, None, false);
    }
    if upper.contains("TIME") {
        return (LogicalType::Time, None, false);
    }
    if upper.contains("CHAR") || upper.contains("CLOB") || upper.contains("TEXT") {
        return (LogicalType::String, declared_length(&upper), false);
    }
    if ["REAL", "FLOA", "DOUB", "NUMERIC", "DECIMAL"]
        .iter()
        .any(|t| upper.contains(t))
    {
        return (LogicalType::Numeric, None, false);
    }

    (LogicalType::Other, None, false)
}

/// Extracts `n` from a declaration like `VARCHAR(n)`.
fn declared_length(declared: &str) -> Option<u32> {
    let open = declared.find('(')?;
    let close = declared[open..].find(')')? + open;
    declared[open + 1..close].trim().parse().ok()
}

/// Rejects table names that cannot be safely interpolated into a
/// PRAGMA statement.
fn check_table_name(table: &str) -> Result<()> {
    if !table.is_empty()
        && table
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        Ok(())
    } else {
        Err(Error::unknown_table(table))
    }
}

impl SchemaProvider for Database {
    fn columns(&self, table: &str) -> Result<Vec<Column>> {
        check_table_name(table)?;

        let mut stmt = self
            .conn
            .prepare(&format!("PRAGMA table_info({table})"))?;

        let rows = stmt.query_map([], |row| {
            let name: String = row.get("name")?;
            let declared: String = row.get("type")?;
            let notnull: bool = row.get("notnull")?;
            let dflt_value: Option<String> = row.get("dflt_value")?;
            Ok((name, declared, notnull, dflt_value))
        })?;

        let mut columns = Vec::new();
        for row in rows {
            let (name, declared, notnull, dflt_value) = row?;
            let (logical_type, length, unsigned) = map_declared_type(&declared);

            let mut column = Column::new(name, logical_type);
            if !notnull {
                column = column.nullable();
            }
            if dflt_value.is_some() {
                column = column.with_default();
            }
            if let Some(length) = length {
                column = column.with_length(length);
            }
            if unsigned {
                column = column.unsigned();
            }
            columns.push(column);
        }

        // PRAGMA table_info on a missing table yields zero rows
        if columns.is_empty() {
            return Err(Error::unknown_table(table));
        }
        Ok(columns)
    }
}
