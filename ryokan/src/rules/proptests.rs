//! Property-based tests for the rule inference engine.

use proptest::prelude::*;

use super::{infer_rules, Mode, NoFilter, RuleKind};
use crate::schema::{Column, LogicalType};

fn logical_type_strategy() -> impl Strategy<Value = LogicalType> {
    prop_oneof![
        Just(LogicalType::Boolean),
        Just(LogicalType::Int),
        Just(LogicalType::Numeric),
        Just(LogicalType::Date),
        Just(LogicalType::Time),
        Just(LogicalType::String),
        Just(LogicalType::Other),
    ]
}

fn column_strategy() -> impl Strategy<Value = Column> {
    (
        "[a-z][a-z_]{0,15}",
        logical_type_strategy(),
        any::<bool>(),
        any::<bool>(),
        proptest::option::of(1u32..=4096),
        any::<bool>(),
    )
        .prop_map(|(name, logical_type, nullable, has_default, length, unsigned)| {
            let mut column = Column::new(name, logical_type);
            column.nullable = nullable;
            column.has_default = has_default;
            column.length = length;
            column.unsigned = unsigned;
            column
        })
}

proptest! {
    // Identical inputs always produce identical rule sets
    #[test]
    fn inference_is_deterministic(columns in proptest::collection::vec(column_strategy(), 0..12)) {
        let first = infer_rules("t", Mode::Create, &columns, None, &NoFilter);
        let second = infer_rules("t", Mode::Create, &columns, None, &NoFilter);
        prop_assert_eq!(first, second);
    }

    // A field carries at most one presence rule, matching the mode
    #[test]
    fn presence_rule_matches_mode(column in column_strategy(), update in any::<bool>()) {
        let mode = if update { Mode::Update } else { Mode::Create };
        let rules = infer_rules("t", mode, &[column], None, &NoFilter);
        for (_, set) in &rules {
            prop_assert!(!(set.contains(RuleKind::Required) && set.contains(RuleKind::Filled)));
            if set.contains(RuleKind::Required) {
                prop_assert!(!update);
            }
            if set.contains(RuleKind::Filled) {
                prop_assert!(update);
            }
        }
    }

    // Boolean columns are never mandatory-present and always nullable
    #[test]
    fn boolean_columns_never_mandatory(mut column in column_strategy(), update in any::<bool>()) {
        column.logical_type = LogicalType::Boolean;
        let mode = if update { Mode::Update } else { Mode::Create };
        let rules = infer_rules("t", mode, &[column], None, &NoFilter);
        for (_, set) in &rules {
            prop_assert!(set.contains(RuleKind::Nullable));
            prop_assert!(!set.contains(RuleKind::Required));
            prop_assert!(!set.contains(RuleKind::Filled));
        }
    }

    // Bookkeeping columns and the excluded foreign key never surface
    #[test]
    fn excluded_columns_never_surface(columns in proptest::collection::vec(column_strategy(), 0..12)) {
        let rules = infer_rules("t", Mode::Create, &columns, Some("parent_id"), &NoFilter);
        for (field, _) in &rules {
            prop_assert_ne!(field.as_str(), "t.id");
            prop_assert_ne!(field.as_str(), "t.created_at");
            prop_assert_ne!(field.as_str(), "t.updated_at");
            prop_assert_ne!(field.as_str(), "t.parent_id");
        }
    }
}
