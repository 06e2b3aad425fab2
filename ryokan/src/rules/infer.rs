//! Rule inference pipeline and save-data assembly.

use serde_json::Value;

use crate::error::Result;
use crate::naming;
use crate::schema::{Column, LogicalType, SchemaProvider};

use super::{FieldRules, Rule, RuleKind, RuleSet};

/// Columns never validated: surrogate key and bookkeeping timestamps.
const SKIPPED_COLUMNS: [&str; 3] = ["id", "created_at", "updated_at"];

/// Validation mode for a request.
///
/// The mode is an explicit input: whether a request is a create or an
/// update is a routing concern decided by the caller, not derived here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// A new record is being created; mandatory fields are `required`.
    Create,
    /// An existing record is being updated; mandatory fields are
    /// `filled` (must be non-empty when present, may be omitted).
    Update,
}

impl Mode {
    /// Returns true for [`Mode::Update`].
    #[must_use]
    pub const fn is_update(self) -> bool {
        matches!(self, Self::Update)
    }
}

/// A JSON object holding validated input or save-ready attributes.
pub type Attributes = serde_json::Map<String, Value>;

/// Extension point for entity-specific rule and save-data adjustments.
///
/// The engine assembles rules from schema metadata alone; business rules
/// that cannot be derived from the schema (cross-field uniqueness, a
/// conditional requirement) hook in here. Both hooks default to
/// pass-through.
pub trait RuleFilter {
    /// Receives the fully-assembled rule set for a field and may add,
    /// remove, or replace rules.
    fn filter_rules(&self, field: &str, column: &Column, rules: RuleSet) -> RuleSet {
        let _ = (field, column);
        rules
    }

    /// Receives the save-ready attribute map for a target and may adjust
    /// it before it is returned to the caller.
    fn filter_save_data(&self, table: &str, attrs: Attributes) -> Attributes {
        let _ = table;
        attrs
    }
}

/// The pass-through [`RuleFilter`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFilter;

impl RuleFilter for NoFilter {}

/// Derives the validation rule set for every column of a table.
///
/// Columns named `id`, `created_at`, or `updated_at` are skipped, as is
/// `exclude_foreign_key` when given (used when the table is a sub-entity
/// owned by a parent validated in the same request). Returned fields are
/// keyed `"{table}.{column}"` in column declaration order.
///
/// The per-column pipeline runs in a fixed order; later steps may remove
/// rules added earlier (a boolean column drops its presence rule):
///
/// 1. presence: non-nullable without default adds `required` (create) or
///    `filled` (update)
/// 2. unsigned adds `min:0`
/// 3. a declared length adds `max:{length}`
/// 4. name patterns add format rules; `{word}_id` adds an existence
///    check against the pluralized table
/// 5. the logical type adds its rule and may veto earlier ones
/// 6. the [`RuleFilter`] hook runs last
///
/// # Examples
///
/// ```
/// use ryokan::rules::{infer_rules, Mode, NoFilter, RuleKind};
/// use ryokan::schema::{Column, LogicalType};
///
/// let columns = vec![Column::new("paid", LogicalType::Boolean)];
/// let rules = infer_rules("reservations", Mode::Create, &columns, None, &NoFilter);
/// let paid = rules.get("reservations.paid").unwrap();
/// assert!(paid.contains(RuleKind::Nullable));
/// assert!(!paid.contains(RuleKind::Required));
/// ```
#[must_use]
pub fn infer_rules(
    table: &str,
    mode: Mode,
    columns: &[Column],
    exclude_foreign_key: Option<&str>,
    filter: &dyn RuleFilter,
) -> FieldRules {
    let mut fields = FieldRules::new();

    for column in columns {
        if SKIPPED_COLUMNS.contains(&column.name.as_str()) {
            continue;
        }
        if exclude_foreign_key == Some(column.name.as_str()) {
            continue;
        }

        let mut rules = RuleSet::new();

        if !column.nullable && !column.has_default {
            rules.insert(if mode.is_update() {
                Rule::Filled
            } else {
                Rule::Required
            });
        }
        if column.unsigned {
            rules.insert(Rule::Min(0));
        }
        if let Some(length) = column.length {
            rules.insert(Rule::Max(length));
        }

        apply_name_rules(&mut rules, &column.name);
        apply_type_rules(&mut rules, column.logical_type);

        let field = format!("{table}.{}", column.name);
        let rules = filter.filter_rules(&field, column, rules);
        log::debug!("inferred rules for {field}: {rules}");
        fields.insert(field, rules);
    }

    fields
}

/// Adds rules derived from the column name, independent of its type.
///
/// Matches are case-insensitive substring checks.
fn apply_name_rules(rules: &mut RuleSet, name: &str) {
    let lower = name.to_ascii_lowercase();

    if lower.contains("email") {
        rules.insert(Rule::Email);
    }
    if lower.contains("url") {
        rules.insert(Rule::Url);
    }
    if lower.contains("phone") {
        rules.insert(Rule::Phone);
    }
    if let Some(table) = naming::foreign_table(&lower) {
        rules.insert(Rule::Exists { table });
    }
    if lower.contains("kana") {
        rules.insert(Rule::Katakana);
    }
    if lower.contains("zip_code") || lower.contains("postal_code") {
        rules.insert(Rule::ZipCode);
    }
}

/// Adds the rule for the normalized column type.
///
/// Booleans are never mandatory-present: an unchecked checkbox simply
/// does not submit a value, so the presence rule is removed and
/// `nullable` added.
fn apply_type_rules(rules: &mut RuleSet, logical_type: LogicalType) {
    match logical_type {
        LogicalType::Boolean => {
            rules.insert(Rule::Boolean);
            rules.insert(Rule::Nullable);
            rules.remove(RuleKind::Required);
            rules.remove(RuleKind::Filled);
        }
        LogicalType::Int => rules.insert(Rule::Integer),
        LogicalType::Numeric => rules.insert(Rule::Numeric),
        LogicalType::Date => rules.insert(Rule::Date),
        LogicalType::Time => rules.insert(Rule::Time),
        LogicalType::String => rules.insert(Rule::String),
        LogicalType::Other => {}
    }
}

/// Extracts the save-ready attribute map for one target.
///
/// `validated` is the nested validated input, keyed by table; the
/// target's sub-map is copied (the input is never mutated), `extra`
/// entries are merged over it (a computed foreign key, for instance),
/// and the result passes through the filter hook.
#[must_use]
pub fn build_save_data(
    table: &str,
    validated: &Attributes,
    extra: Attributes,
    filter: &dyn RuleFilter,
) -> Attributes {
    let mut attrs = match validated.get(table) {
        Some(Value::Object(map)) => map.clone(),
        _ => Attributes::new(),
    };
    for (key, value) in extra {
        attrs.insert(key, value);
    }
    filter.filter_save_data(table, attrs)
}

/// Save-ready attributes for a sub-target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedSave {
    /// The sub-target's table.
    pub table: String,
    /// The relation name linking it to the primary target.
    pub relation: String,
    /// The attributes to persist.
    pub attributes: Attributes,
}

/// Save-ready attributes for a primary target and its sub-targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveBundle {
    /// The primary target's attributes.
    pub attributes: Attributes,
    /// Sub-target attributes, in the caller-supplied relation order.
    pub related: Vec<RelatedSave>,
}

/// Builds save data for a primary target and each of its sub-targets.
///
/// The primary target's attributes come first and receive `extra`;
/// sub-target maps receive no extras, since the parent id they reference
/// does not exist until the primary row is inserted.
#[must_use]
pub fn collect_save_data(
    targets: &Targets,
    validated: &Attributes,
    extra: Attributes,
    filter: &dyn RuleFilter,
) -> SaveBundle {
    let attributes = build_save_data(&targets.primary, validated, extra, filter);
    let related = targets
        .subs
        .iter()
        .map(|(relation, table)| RelatedSave {
            table: table.clone(),
            relation: relation.clone(),
            attributes: build_save_data(table, validated, Attributes::new(), filter),
        })
        .collect();
    SaveBundle {
        attributes,
        related,
    }
}

/// The targets of one validation request: a primary table plus the
/// dependent tables validated with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Targets {
    primary: String,
    subs: Vec<(String, String)>,
}

impl Targets {
    /// Creates a target list with only a primary table.
    #[must_use]
    pub fn new(primary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            subs: Vec::new(),
        }
    }

    /// Adds a sub-target under the given relation name.
    #[must_use]
    pub fn with_sub(mut self, relation: impl Into<String>, table: impl Into<String>) -> Self {
        self.subs.push((relation.into(), table.into()));
        self
    }

    /// The primary table.
    #[must_use]
    pub fn primary(&self) -> &str {
        &self.primary
    }

    /// The `(relation, table)` sub-targets, in insertion order.
    #[must_use]
    pub fn subs(&self) -> &[(String, String)] {
        &self.subs
    }
}

/// Resolves columns through a [`SchemaProvider`] and infers rules for a
/// full validation request.
///
/// This is the composition layer over [`infer_rules`]: it fetches column
/// metadata for the primary target and every sub-target, and excludes
/// the primary's conventional foreign key column throughout (a
/// sub-entity's link to its parent is computed, never user input).
/// [`CrudValidator::with_excluded_key`] replaces the conventional
/// derivation for schemas that name the link column differently.
///
/// # Examples
///
/// ```
/// use ryokan::rules::{CrudValidator, Mode, NoFilter, Targets};
/// use ryokan::schema::{Column, LogicalType, SchemaCatalog};
///
/// let mut catalog = SchemaCatalog::new();
/// catalog.insert_table("rooms", vec![
///     Column::new("name", LogicalType::String).with_length(255),
/// ]);
///
/// let validator = CrudValidator::new(&catalog, Mode::Create);
/// let rules = validator.rules(&Targets::new("rooms"), &NoFilter).unwrap();
/// assert!(rules.get("rooms.name").is_some());
/// ```
#[derive(Debug)]
pub struct CrudValidator<'a, S: SchemaProvider + ?Sized> {
    schema: &'a S,
    mode: Mode,
    excluded_key: Option<String>,
}

impl<'a, S: SchemaProvider + ?Sized> CrudValidator<'a, S> {
    /// Creates a validator over a schema provider.
    pub fn new(schema: &'a S, mode: Mode) -> Self {
        Self {
            schema,
            mode,
            excluded_key: None,
        }
    }

    /// Replaces the conventionally-derived excluded foreign key column.
    #[must_use]
    pub fn with_excluded_key(mut self, column: impl Into<String>) -> Self {
        self.excluded_key = Some(column.into());
        self
    }

    /// The validation mode.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Infers rules for the primary target and all sub-targets.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Configuration`] when any target has no
    /// resolvable schema metadata.
    pub fn rules(&self, targets: &Targets, filter: &dyn RuleFilter) -> Result<FieldRules> {
        let foreign_key = match &self.excluded_key {
            Some(column) => column.clone(),
            None => naming::foreign_key(&targets.primary),
        };
        let mut fields = FieldRules::new();

        let columns = self.schema.columns(&targets.primary)?;
        fields.extend(infer_rules(
            &targets.primary,
            self.mode,
            &columns,
            Some(&foreign_key),
            filter,
        ));

        for (_, table) in &targets.subs {
            let columns = self.schema.columns(table)?;
            fields.extend(infer_rules(
                table,
                self.mode,
                &columns,
                Some(&foreign_key),
                filter,
            ));
        }

        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaCatalog;
    use serde_json::json;

    fn reservation_columns() -> Vec<Column> {
        vec![
            Column::new("id", LogicalType::Int).unsigned(),
            Column::new("room_id", LogicalType::Int).unsigned(),
            Column::new("guest_id", LogicalType::Int).unsigned(),
            Column::new("start_date", LogicalType::Date),
            Column::new("end_date", LogicalType::Date),
            Column::new("checkout", LogicalType::Time).nullable(),
            Column::new("created_at", LogicalType::Date).nullable(),
            Column::new("updated_at", LogicalType::Date).nullable(),
        ]
    }

    #[test]
    fn test_skips_bookkeeping_columns() {
        let rules = infer_rules(
            "reservations",
            Mode::Create,
            &reservation_columns(),
            None,
            &NoFilter,
        );
        assert!(rules.get("reservations.id").is_none());
        assert!(rules.get("reservations.created_at").is_none());
        assert!(rules.get("reservations.updated_at").is_none());
        assert!(rules.get("reservations.room_id").is_some());
    }

    #[test]
    fn test_skips_excluded_foreign_key() {
        let columns = vec![
            Column::new("reservation_id", LogicalType::Int).unsigned(),
            Column::new("payment", LogicalType::Int).unsigned(),
        ];
        let rules = infer_rules(
            "reservation_details",
            Mode::Create,
            &columns,
            Some("reservation_id"),
            &NoFilter,
        );
        assert!(rules.get("reservation_details.reservation_id").is_none());
        assert!(rules.get("reservation_details.payment").is_some());
    }

    #[test]
    fn test_presence_rule_by_mode() {
        let columns = vec![Column::new("name", LogicalType::String)];

        let create = infer_rules("guests", Mode::Create, &columns, None, &NoFilter);
        let set = create.get("guests.name").unwrap();
        assert!(set.contains(RuleKind::Required));
        assert!(!set.contains(RuleKind::Filled));

        let update = infer_rules("guests", Mode::Update, &columns, None, &NoFilter);
        let set = update.get("guests.name").unwrap();
        assert!(set.contains(RuleKind::Filled));
        assert!(!set.contains(RuleKind::Required));
    }

    #[test]
    fn test_no_presence_rule_when_nullable_or_defaulted() {
        let columns = vec![
            Column::new("memo", LogicalType::String).nullable(),
            Column::new("status", LogicalType::Int).with_default(),
        ];
        let rules = infer_rules("guests", Mode::Create, &columns, None, &NoFilter);
        assert!(!rules.get("guests.memo").unwrap().contains(RuleKind::Required));
        assert!(!rules
            .get("guests.status")
            .unwrap()
            .contains(RuleKind::Required));
    }

    #[test]
    fn test_unsigned_and_length() {
        let columns = vec![Column::new("name", LogicalType::String)
            .with_length(255)];
        let rules = infer_rules("rooms", Mode::Create, &columns, None, &NoFilter);
        assert_eq!(
            rules.get("rooms.name").unwrap().get(RuleKind::Max),
            Some(&Rule::Max(255))
        );

        let columns = vec![Column::new("price", LogicalType::Int).unsigned()];
        let rules = infer_rules("rooms", Mode::Create, &columns, None, &NoFilter);
        assert_eq!(
            rules.get("rooms.price").unwrap().get(RuleKind::Min),
            Some(&Rule::Min(0))
        );
    }

    #[test]
    fn test_name_pattern_rules() {
        let columns = vec![
            Column::new("email", LogicalType::String).with_length(255),
            Column::new("homepage_url", LogicalType::String).nullable(),
            Column::new("phone", LogicalType::String).with_length(20),
            Column::new("name_kana", LogicalType::String).with_length(255),
            Column::new("zip_code", LogicalType::String).with_length(8),
            Column::new("postal_code_extra", LogicalType::String).nullable(),
        ];
        let rules = infer_rules("guests", Mode::Create, &columns, None, &NoFilter);
        assert!(rules.get("guests.email").unwrap().contains(RuleKind::Email));
        assert!(rules
            .get("guests.homepage_url")
            .unwrap()
            .contains(RuleKind::Url));
        assert!(rules.get("guests.phone").unwrap().contains(RuleKind::Phone));
        assert!(rules
            .get("guests.name_kana")
            .unwrap()
            .contains(RuleKind::Katakana));
        assert!(rules
            .get("guests.zip_code")
            .unwrap()
            .contains(RuleKind::ZipCode));
        assert!(rules
            .get("guests.postal_code_extra")
            .unwrap()
            .contains(RuleKind::ZipCode));
    }

    #[test]
    fn test_name_rules_case_insensitive() {
        let columns = vec![Column::new("Email", LogicalType::String)];
        let rules = infer_rules("guests", Mode::Create, &columns, None, &NoFilter);
        assert!(rules.get("guests.Email").unwrap().contains(RuleKind::Email));
    }

    #[test]
    fn test_foreign_key_exists_rule() {
        let rules = infer_rules(
            "reservations",
            Mode::Create,
            &reservation_columns(),
            None,
            &NoFilter,
        );
        assert_eq!(
            rules
                .get("reservations.room_id")
                .unwrap()
                .get(RuleKind::Exists),
            Some(&Rule::Exists {
                table: "rooms".into()
            })
        );
        assert_eq!(
            rules
                .get("reservations.guest_id")
                .unwrap()
                .get(RuleKind::Exists),
            Some(&Rule::Exists {
                table: "guests".into()
            })
        );
    }

    #[test]
    fn test_boolean_never_mandatory() {
        let columns = vec![Column::new("paid", LogicalType::Boolean)];

        for mode in [Mode::Create, Mode::Update] {
            let rules = infer_rules("reservations", mode, &columns, None, &NoFilter);
            let set = rules.get("reservations.paid").unwrap();
            assert!(set.contains(RuleKind::Boolean));
            assert!(set.contains(RuleKind::Nullable));
            assert!(!set.contains(RuleKind::Required));
            assert!(!set.contains(RuleKind::Filled));
        }
    }

    #[test]
    fn test_type_rules() {
        let columns = vec![
            Column::new("count", LogicalType::Int),
            Column::new("rate", LogicalType::Numeric),
            Column::new("start_date", LogicalType::Date),
            Column::new("checkout", LogicalType::Time),
            Column::new("name", LogicalType::String),
            Column::new("blob_data", LogicalType::Other),
        ];
        let rules = infer_rules("t", Mode::Create, &columns, None, &NoFilter);
        assert!(rules.get("t.count").unwrap().contains(RuleKind::Integer));
        assert!(rules.get("t.rate").unwrap().contains(RuleKind::Numeric));
        assert!(rules.get("t.start_date").unwrap().contains(RuleKind::Date));
        assert!(rules.get("t.checkout").unwrap().contains(RuleKind::Time));
        assert!(rules.get("t.name").unwrap().contains(RuleKind::String));
        // Unrecognized type contributes nothing beyond the presence rule
        assert_eq!(rules.get("t.blob_data").unwrap().len(), 1);
    }

    #[test]
    fn test_inference_is_idempotent() {
        let columns = reservation_columns();
        let first = infer_rules("reservations", Mode::Create, &columns, None, &NoFilter);
        let second = infer_rules("reservations", Mode::Create, &columns, None, &NoFilter);
        assert_eq!(first, second);
    }

    struct UniqueRoomName;

    impl RuleFilter for UniqueRoomName {
        fn filter_rules(&self, field: &str, _column: &Column, mut rules: RuleSet) -> RuleSet {
            if field == "rooms.name" {
                rules.remove(RuleKind::Max);
            }
            rules
        }

        fn filter_save_data(&self, table: &str, mut attrs: Attributes) -> Attributes {
            if table == "rooms" {
                attrs.insert("curated".into(), Value::Bool(true));
            }
            attrs
        }
    }

    #[test]
    fn test_rule_filter_hook() {
        let columns = vec![Column::new("name", LogicalType::String).with_length(255)];
        let rules = infer_rules("rooms", Mode::Create, &columns, None, &UniqueRoomName);
        let set = rules.get("rooms.name").unwrap();
        assert!(set.contains(RuleKind::Required));
        assert!(!set.contains(RuleKind::Max));
    }

    #[test]
    fn test_build_save_data() {
        let validated = json!({
            "rooms": {"name": "Sakura", "price": 12000},
            "guests": {"name": "Yamada"}
        });
        let Value::Object(validated) = validated else {
            unreachable!()
        };

        let mut extra = Attributes::new();
        extra.insert("number".into(), json!(2));

        let attrs = build_save_data("rooms", &validated, extra, &NoFilter);
        assert_eq!(attrs.get("name"), Some(&json!("Sakura")));
        assert_eq!(attrs.get("price"), Some(&json!(12000)));
        assert_eq!(attrs.get("number"), Some(&json!(2)));
        assert!(attrs.get("guests").is_none());
        // Input untouched
        assert!(validated["rooms"].as_object().unwrap().get("number").is_none());
    }

    #[test]
    fn test_build_save_data_missing_table() {
        let validated = Attributes::new();
        let attrs = build_save_data("rooms", &validated, Attributes::new(), &NoFilter);
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_build_save_data_filter_hook() {
        let validated = Attributes::new();
        let attrs = build_save_data("rooms", &validated, Attributes::new(), &UniqueRoomName);
        assert_eq!(attrs.get("curated"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_collect_save_data_order() {
        let validated = json!({
            "reservations": {"start_date": "2026-09-01"},
            "reservation_details": {"payment": 12000}
        });
        let Value::Object(validated) = validated else {
            unreachable!()
        };

        let targets =
            Targets::new("reservations").with_sub("detail", "reservation_details");
        let bundle = collect_save_data(&targets, &validated, Attributes::new(), &NoFilter);

        assert_eq!(bundle.attributes.get("start_date"), Some(&json!("2026-09-01")));
        assert_eq!(bundle.related.len(), 1);
        assert_eq!(bundle.related[0].relation, "detail");
        assert_eq!(bundle.related[0].table, "reservation_details");
        assert_eq!(bundle.related[0].attributes.get("payment"), Some(&json!(12000)));
    }

    #[test]
    fn test_crud_validator_composes_targets() {
        let mut catalog = SchemaCatalog::new();
        catalog.insert_table("reservations", reservation_columns());
        catalog.insert_table(
            "reservation_details",
            vec![
                Column::new("reservation_id", LogicalType::Int).unsigned(),
                Column::new("payment", LogicalType::Int).unsigned(),
            ],
        );

        let validator = CrudValidator::new(&catalog, Mode::Create);
        let targets = Targets::new("reservations").with_sub("detail", "reservation_details");
        let rules = validator.rules(&targets, &NoFilter).unwrap();

        // Primary fields come first, then sub-target fields
        let names: Vec<_> = rules.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "reservations.room_id",
                "reservations.guest_id",
                "reservations.start_date",
                "reservations.end_date",
                "reservations.checkout",
                "reservation_details.payment",
            ]
        );
        // The primary's foreign key is excluded from the sub-target
        assert!(rules.get("reservation_details.reservation_id").is_none());
    }

    #[test]
    fn test_crud_validator_excluded_key_override() {
        let mut catalog = SchemaCatalog::new();
        catalog.insert_table("reservations", reservation_columns());

        let validator =
            CrudValidator::new(&catalog, Mode::Create).with_excluded_key("room_id");
        let rules = validator.rules(&Targets::new("reservations"), &NoFilter).unwrap();

        assert!(rules.get("reservations.room_id").is_none());
        assert!(rules.get("reservations.guest_id").is_some());
    }

    #[test]
    fn test_crud_validator_unknown_table() {
        let catalog = SchemaCatalog::new();
        let validator = CrudValidator::new(&catalog, Mode::Create);
        let err = validator
            .rules(&Targets::new("nope"), &NoFilter)
            .unwrap_err();
        assert!(err.is_configuration());
    }
}
