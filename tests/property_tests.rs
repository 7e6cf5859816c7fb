//! Property-based tests for the record engine.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use std::sync::Arc;

use fieldguard::{
    ConstrainedStringBuilder, ErrorKind, FieldBuilder, Outcome, Record, RecordSchema,
    SchemaBuilder,
};
use proptest::prelude::*;
use serde_json::json;

fn point_schema() -> Arc<RecordSchema> {
    SchemaBuilder::new("point")
        .field(FieldBuilder::new("x").named_check("int"))
        .unwrap()
        .field(FieldBuilder::new("y").named_check("int"))
        .unwrap()
        .field(FieldBuilder::new("label").default(json!("p")))
        .unwrap()
        .build()
}

proptest! {
    #[test]
    fn construction_round_trips_supplied_values(x in any::<i64>(), y in any::<i64>()) {
        let schema = point_schema();
        let point = Record::construct(&schema, [("x", json!(x)), ("y", json!(y))]).unwrap();

        prop_assert_eq!(point.get("x").unwrap(), &json!(x));
        prop_assert_eq!(point.get("y").unwrap(), &json!(y));
        prop_assert_eq!(point.get("label").unwrap(), &json!("p"));
    }

    #[test]
    fn to_pairs_always_covers_every_field_once(x in any::<i64>(), y in any::<i64>()) {
        let schema = point_schema();
        let point = Record::construct(&schema, [("x", json!(x)), ("y", json!(y))]).unwrap();

        let pairs = point.to_pairs();
        prop_assert_eq!(pairs.len(), schema.len());
        let names: Vec<&str> = pairs.iter().map(|(name, _)| name.as_str()).collect();
        prop_assert_eq!(names, schema.field_names());
    }

    #[test]
    fn values_at_matches_request_order(x in any::<i64>(), y in any::<i64>()) {
        let schema = point_schema();
        let point = Record::construct(&schema, [("x", json!(x)), ("y", json!(y))]).unwrap();

        let values = point.values_at(["y", "x"]).unwrap();
        prop_assert_eq!(values, vec![json!(y), json!(x)]);
    }

    #[test]
    fn spurious_keys_always_fail_construction(name in "[a-z]{4,8}") {
        prop_assume!(name != "label");
        let schema = point_schema();
        let result = Record::construct(
            &schema,
            [
                ("x".to_string(), json!(1)),
                ("y".to_string(), json!(2)),
                (name, json!(3)),
            ],
        );

        let error = result.unwrap_err();
        prop_assert_eq!(error.kind(), ErrorKind::Argument);
    }

    #[test]
    fn non_integer_values_never_construct(x in "[a-z]{1,8}") {
        let schema = point_schema();
        let result = Record::construct(&schema, [("x", json!(x)), ("y", json!(2))]);

        let error = result.unwrap_err();
        prop_assert_eq!(error.kind(), ErrorKind::Constraint);
    }

    #[test]
    fn merge_without_overrides_preserves_every_value(x in any::<i64>(), y in any::<i64>()) {
        let schema = point_schema();
        let point = Record::construct(&schema, [("x", json!(x)), ("y", json!(y))]).unwrap();

        let merged = point
            .merge(Vec::<(String, fieldguard::Value)>::new())
            .into_result()
            .unwrap();
        prop_assert_eq!(merged.to_pairs(), point.to_pairs());
    }

    #[test]
    fn merge_applies_exactly_the_override(x in any::<i64>(), y in any::<i64>(), new_x in any::<i64>()) {
        let schema = point_schema();
        let point = Record::construct(&schema, [("x", json!(x)), ("y", json!(y))]).unwrap();

        let merged = point.merge([("x", json!(new_x))]).into_result().unwrap();
        prop_assert_eq!(merged.get("x").unwrap(), &json!(new_x));
        prop_assert_eq!(merged.get("y").unwrap(), &json!(y));
        // The source record is untouched.
        prop_assert_eq!(point.get("x").unwrap(), &json!(x));
    }

    #[test]
    fn positional_construction_agrees_with_named(x in any::<i64>(), y in any::<i64>()) {
        let schema = point_schema();
        let named = Record::construct(
            &schema,
            [("x", json!(x)), ("y", json!(y)), ("label", json!("q"))],
        )
        .unwrap();
        let positional =
            Record::construct_positional(&schema, vec![json!(x), json!(y), json!("q")]).unwrap();

        prop_assert_eq!(named.to_pairs(), positional.to_pairs());
    }

    #[test]
    fn size_validator_accepts_exactly_the_range(subject in "[a-z]{0,6}") {
        let validator = ConstrainedStringBuilder::new().size(1..=3).build().unwrap();
        let length = subject.chars().count();

        let report = validator.check_str(&subject);
        prop_assert_eq!(report.is_valid(), (1..=3).contains(&length));
    }

    #[test]
    fn string_checks_are_deterministic(subject in "\\PC{0,12}") {
        let validator = ConstrainedStringBuilder::new()
            .min(2)
            .prefix("a")
            .build()
            .unwrap();

        let first = validator.check_str(&subject);
        let second = validator.check_str(&subject);
        prop_assert_eq!(first.errors(), second.errors());
    }

    #[test]
    fn outcome_preserves_its_payload(value in any::<i64>()) {
        let outcome = Outcome::ok(value);
        prop_assert!(outcome.is_ok());
        prop_assert_eq!(outcome.into_result().unwrap(), value);
    }

    #[test]
    fn outcome_preserves_its_message(message in "\\PC{1,24}") {
        let outcome: Outcome<()> = Outcome::error(message.clone());
        prop_assert!(!outcome.is_ok());
        prop_assert_eq!(outcome.into_result().unwrap_err().to_string(), message);
    }
}
