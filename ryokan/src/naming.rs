//! Naming helpers for mapping between entities, tables, and foreign keys.
//!
//! Column and table names follow the usual relational conventions:
//! snake_case, plural table names, and `{singular}_id` foreign keys.
//! The rule inference engine uses these helpers to turn a `room_id`
//! column into an existence check against the `rooms` table, and to
//! derive the foreign key a sub-target receives from its parent.

/// Pluralizes the final word of a snake_case name.
///
/// Handles the common English suffixes needed for relational naming;
/// this is intentionally not a full inflection engine.
///
/// # Examples
///
/// ```
/// use ryokan::naming::pluralize;
///
/// assert_eq!(pluralize("room"), "rooms");
/// assert_eq!(pluralize("guest_detail"), "guest_details");
/// assert_eq!(pluralize("category"), "categories");
/// assert_eq!(pluralize("status"), "statuses");
/// ```
#[must_use]
pub fn pluralize(name: &str) -> String {
    let (prefix, word) = split_last_word(name);
    let plural = pluralize_word(word);
    format!("{prefix}{plural}")
}

/// Singularizes the final word of a snake_case name.
///
/// Inverse of [`pluralize`] for the suffixes it produces.
///
/// # Examples
///
/// ```
/// use ryokan::naming::singularize;
///
/// assert_eq!(singularize("rooms"), "room");
/// assert_eq!(singularize("categories"), "category");
/// assert_eq!(singularize("statuses"), "status");
/// assert_eq!(singularize("guest_details"), "guest_detail");
/// ```
#[must_use]
pub fn singularize(name: &str) -> String {
    let (prefix, word) = split_last_word(name);
    let singular = singularize_word(word);
    format!("{prefix}{singular}")
}

/// Derives the referenced table name from a foreign key column name.
///
/// Returns `None` when the column does not match `^(\w+)_id$`.
///
/// # Examples
///
/// ```
/// use ryokan::naming::foreign_table;
///
/// assert_eq!(foreign_table("room_id").as_deref(), Some("rooms"));
/// assert_eq!(foreign_table("guest_detail_id").as_deref(), Some("guest_details"));
/// assert_eq!(foreign_table("id"), None);
/// assert_eq!(foreign_table("paid"), None);
/// ```
#[must_use]
pub fn foreign_table(column: &str) -> Option<String> {
    let stem = column.strip_suffix("_id")?;
    if stem.is_empty() || !stem.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }
    Some(pluralize(stem))
}

/// Derives the conventional foreign key column name for a table.
///
/// # Examples
///
/// ```
/// use ryokan::naming::foreign_key;
///
/// assert_eq!(foreign_key("reservations"), "reservation_id");
/// assert_eq!(foreign_key("guests"), "guest_id");
/// ```
#[must_use]
pub fn foreign_key(table: &str) -> String {
    format!("{}_id", singularize(table))
}

fn split_last_word(name: &str) -> (&str, &str) {
    match name.rfind('_') {
        Some(idx) => (&name[..=idx], &name[idx + 1..]),
        None => ("", name),
    }
}

fn pluralize_word(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    if let Some(stem) = word.strip_suffix('y') {
        // "day" -> "days", "category" -> "categories"
        let vowel_before = stem
            .chars()
            .last()
            .is_some_and(|c| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u'));
        if !vowel_before && !stem.is_empty() {
            return format!("{stem}ies");
        }
    }
    if word.ends_with('s')
        || word.ends_with('x')
        || word.ends_with('z')
        || word.ends_with("ch")
        || word.ends_with("sh")
    {
        return format!("{word}es");
    }
    format!("{word}s")
}

fn singularize_word(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{stem}y");
        }
    }
    if let Some(stem) = word.strip_suffix("es") {
        if stem.ends_with('s') || stem.ends_with('x') || stem.ends_with('z') {
            return stem.to_string();
        }
        if stem.ends_with("ch") || stem.ends_with("sh") {
            return stem.to_string();
        }
    }
    if let Some(stem) = word.strip_suffix('s') {
        if !stem.is_empty() {
            return stem.to_string();
        }
    }
    word.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pluralize_simple() {
        assert_eq!(pluralize("room"), "rooms");
        assert_eq!(pluralize("guest"), "guests");
        assert_eq!(pluralize("reservation"), "reservations");
        assert_eq!(pluralize("setting"), "settings");
    }

    #[test]
    fn test_pluralize_suffixes() {
        assert_eq!(pluralize("category"), "categories");
        assert_eq!(pluralize("day"), "days");
        assert_eq!(pluralize("status"), "statuses");
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("branch"), "branches");
    }

    #[test]
    fn test_pluralize_compound() {
        assert_eq!(pluralize("guest_detail"), "guest_details");
        assert_eq!(pluralize("reservation_detail"), "reservation_details");
    }

    #[test]
    fn test_singularize() {
        assert_eq!(singularize("rooms"), "room");
        assert_eq!(singularize("guests"), "guest");
        assert_eq!(singularize("reservations"), "reservation");
        assert_eq!(singularize("categories"), "category");
        assert_eq!(singularize("statuses"), "status");
        assert_eq!(singularize("guest_details"), "guest_detail");
    }

    #[test]
    fn test_singularize_non_plural() {
        assert_eq!(singularize("s"), "s");
        assert_eq!(singularize("data"), "data");
    }

    #[test]
    fn test_roundtrip() {
        for word in ["room", "guest", "category", "status", "guest_detail"] {
            assert_eq!(singularize(&pluralize(word)), word);
        }
    }

    #[test]
    fn test_foreign_table() {
        assert_eq!(foreign_table("room_id").as_deref(), Some("rooms"));
        assert_eq!(foreign_table("guest_id").as_deref(), Some("guests"));
        assert_eq!(
            foreign_table("guest_detail_id").as_deref(),
            Some("guest_details")
        );
        assert_eq!(foreign_table("category_id").as_deref(), Some("categories"));
    }

    #[test]
    fn test_foreign_table_non_matching() {
        assert_eq!(foreign_table("id"), None);
        assert_eq!(foreign_table("paid"), None);
        assert_eq!(foreign_table("name"), None);
        assert_eq!(foreign_table("_id"), None);
    }

    #[test]
    fn test_foreign_key() {
        assert_eq!(foreign_key("reservations"), "reservation_id");
        assert_eq!(foreign_key("guests"), "guest_id");
        assert_eq!(foreign_key("guest_details"), "guest_detail_id");
    }
}
