//! Validation rule types and the schema-driven inference engine.
//!
//! This module derives form-validation rules directly from column
//! metadata: nullability and defaults decide presence rules, declared
//! lengths become maximums, name patterns contribute format rules
//! (`email`, `zip_code`, `*_id` existence checks), and the normalized
//! column type contributes its own rule and may veto earlier ones.
//!
//! The engine is a pure function of its inputs: identical column
//! metadata and mode always produce an identical [`FieldRules`] value.
//!
//! # Examples
//!
//! ```
//! use ryokan::rules::{infer_rules, Mode, NoFilter, Rule, RuleKind};
//! use ryokan::schema::{Column, LogicalType};
//!
//! let columns = vec![
//!     Column::new("name", LogicalType::String).with_length(255),
//!     Column::new("room_id", LogicalType::Int).unsigned(),
//! ];
//! let rules = infer_rules("reservations", Mode::Create, &columns, None, &NoFilter);
//!
//! let name = rules.get("reservations.name").unwrap();
//! assert!(name.contains(RuleKind::Required));
//! assert!(name.contains(RuleKind::Max));
//!
//! let room = rules.get("reservations.room_id").unwrap();
//! assert_eq!(
//!     room.get(RuleKind::Exists),
//!     Some(&Rule::Exists { table: "rooms".to_string() })
//! );
//! ```

mod infer;
#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use infer::{
    build_save_data, collect_save_data, infer_rules, Attributes, CrudValidator, Mode, NoFilter,
    RelatedSave, RuleFilter, SaveBundle, Targets,
};

use std::fmt;

/// A single validation rule, with its parameterization.
///
/// At most one rule of each [`RuleKind`] appears in a [`RuleSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// The field must be present and non-empty (create mode).
    Required,
    /// The field must be non-empty when present (update mode).
    Filled,
    /// The field may be null.
    Nullable,
    /// The value must be a boolean.
    Boolean,
    /// The value must be an integer.
    Integer,
    /// The value must be numeric.
    Numeric,
    /// The value must be a calendar date.
    Date,
    /// The value must be a time of day in `HH:MM` format.
    Time,
    /// The value must be a string.
    String,
    /// The value must be at least this large.
    Min(i64),
    /// The value must be at most this long or large.
    Max(u32),
    /// The value must be an email address.
    Email,
    /// The value must be a URL.
    Url,
    /// The value must be a phone number.
    Phone,
    /// The value must be katakana text.
    Katakana,
    /// The value must be a postal code.
    ZipCode,
    /// The value must reference an existing row.
    Exists {
        /// The table whose `id` column must contain the value.
        table: String,
    },
}

impl Rule {
    /// Returns the kind of this rule, ignoring parameterization.
    #[must_use]
    pub const fn kind(&self) -> RuleKind {
        match self {
            Self::Required => RuleKind::Required,
            Self::Filled => RuleKind::Filled,
            Self::Nullable => RuleKind::Nullable,
            Self::Boolean => RuleKind::Boolean,
            Self::Integer => RuleKind::Integer,
            Self::Numeric => RuleKind::Numeric,
            Self::Date => RuleKind::Date,
            Self::Time => RuleKind::Time,
            Self::String => RuleKind::String,
            Self::Min(_) => RuleKind::Min,
            Self::Max(_) => RuleKind::Max,
            Self::Email => RuleKind::Email,
            Self::Url => RuleKind::Url,
            Self::Phone => RuleKind::Phone,
            Self::Katakana => RuleKind::Katakana,
            Self::ZipCode => RuleKind::ZipCode,
            Self::Exists { .. } => RuleKind::Exists,
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "required"),
            Self::Filled => write!(f, "filled"),
            Self::Nullable => write!(f, "nullable"),
            Self::Boolean => write!(f, "boolean"),
            Self::Integer => write!(f, "integer"),
            Self::Numeric => write!(f, "numeric"),
            Self::Date => write!(f, "date"),
            Self::Time => write!(f, "time:H:M"),
            Self::String => write!(f, "string"),
            Self::Min(min) => write!(f, "min:{min}"),
            Self::Max(max) => write!(f, "max:{max}"),
            Self::Email => write!(f, "email"),
            Self::Url => write!(f, "url"),
            Self::Phone => write!(f, "phone"),
            Self::Katakana => write!(f, "katakana"),
            Self::ZipCode => write!(f, "zip_code"),
            Self::Exists { table } => write!(f, "exists:{table},id"),
        }
    }
}

/// The kind of a [`Rule`], without parameterization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// See [`Rule::Required`].
    Required,
    /// See [`Rule::Filled`].
    Filled,
    /// See [`Rule::Nullable`].
    Nullable,
    /// See [`Rule::Boolean`].
    Boolean,
    /// See [`Rule::Integer`].
    Integer,
    /// See [`Rule::Numeric`].
    Numeric,
    /// See [`Rule::Date`].
    Date,
    /// See [`Rule::Time`].
    Time,
    /// See [`Rule::String`].
    String,
    /// See [`Rule::Min`].
    Min,
    /// See [`Rule::Max`].
    Max,
    /// See [`Rule::Email`].
    Email,
    /// See [`Rule::Url`].
    Url,
    /// See [`Rule::Phone`].
    Phone,
    /// See [`Rule::Katakana`].
    Katakana,
    /// See [`Rule::ZipCode`].
    ZipCode,
    /// See [`Rule::Exists`].
    Exists,
}

/// An ordered set of validation rules, at most one per [`RuleKind`].
///
/// Insertion order is preserved (a replacement keeps the original
/// position) so rule listings are reproducible.
///
/// # Examples
///
/// ```
/// use ryokan::rules::{Rule, RuleKind, RuleSet};
///
/// let mut rules = RuleSet::new();
/// rules.insert(Rule::Required);
/// rules.insert(Rule::Max(255));
/// rules.insert(Rule::Max(100)); // replaces, keeps position
///
/// assert_eq!(rules.len(), 2);
/// assert_eq!(rules.get(RuleKind::Max), Some(&Rule::Max(100)));
/// assert_eq!(format!("{rules}"), "required|max:100");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Creates an empty rule set.
    #[must_use]
    pub const fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Inserts a rule, replacing any existing rule of the same kind in
    /// place.
    pub fn insert(&mut self, rule: Rule) {
        let kind = rule.kind();
        if let Some(existing) = self.rules.iter_mut().find(|r| r.kind() == kind) {
            *existing = rule;
        } else {
            self.rules.push(rule);
        }
    }

    /// Removes the rule of the given kind, if present.
    pub fn remove(&mut self, kind: RuleKind) -> Option<Rule> {
        let idx = self.rules.iter().position(|r| r.kind() == kind)?;
        Some(self.rules.remove(idx))
    }

    /// Returns true if a rule of the given kind is present.
    #[must_use]
    pub fn contains(&self, kind: RuleKind) -> bool {
        self.rules.iter().any(|r| r.kind() == kind)
    }

    /// Returns the rule of the given kind, if present.
    #[must_use]
    pub fn get(&self, kind: RuleKind) -> Option<&Rule> {
        self.rules.iter().find(|r| r.kind() == kind)
    }

    /// Returns the number of rules in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the set contains no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterates over the rules in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Renders each rule as a string, in insertion order.
    #[must_use]
    pub fn to_strings(&self) -> Vec<String> {
        self.rules.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for rule in &self.rules {
            if !first {
                write!(f, "|")?;
            }
            write!(f, "{rule}")?;
            first = false;
        }
        Ok(())
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<T: IntoIterator<Item = Rule>>(iter: T) -> Self {
        let mut set = Self::new();
        for rule in iter {
            set.insert(rule);
        }
        set
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// Rule sets for every field of a validation request, keyed
/// `"{table}.{column}"` and ordered by target then column declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldRules {
    entries: Vec<(String, RuleSet)>,
}

impl FieldRules {
    /// Creates an empty mapping.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts a field's rule set, replacing any existing entry in place.
    pub fn insert(&mut self, field: impl Into<String>, rules: RuleSet) {
        let field = field.into();
        if let Some(existing) = self.entries.iter_mut().find(|(name, _)| *name == field) {
            existing.1 = rules;
        } else {
            self.entries.push((field, rules));
        }
    }

    /// Returns the rule set for a field, if present.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&RuleSet> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, rules)| rules)
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no fields are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(field, rules)` pairs in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, (String, RuleSet)> {
        self.entries.iter()
    }

    /// Absorbs all entries from another mapping, preserving order.
    pub fn extend(&mut self, other: Self) {
        for (field, rules) in other.entries {
            self.insert(field, rules);
        }
    }
}

impl<'a> IntoIterator for &'a FieldRules {
    type Item = &'a (String, RuleSet);
    type IntoIter = std::slice::Iter<'a, (String, RuleSet)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
