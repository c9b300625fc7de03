//! Property-based tests for validation invariants.
//!
//! These tests verify properties that must hold for any schema and candidate:
//! - A successful result has exactly the schema's keys
//! - Every choice constraint and dependency rule is satisfied
//! - Absent keys not touched by a rule hold their default
//! - Re-validating a result changes nothing
//! - Unknown keys and null values are always rejected

use mlhep_config::{
    default_config, validate, values_match, Configuration, DependencyRule, Notice, ParamValue,
    ParameterSpec, Schema, ValidationError,
};
use proptest::prelude::*;
use proptest::sample::Index;

const MAX_PARAMS: usize = 8;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

/// Shape of one generated parameter.
#[derive(Debug, Clone)]
struct ParamShape {
    constrained: bool,
    default: i64,
    /// (index of an earlier parameter, trigger value, forced value)
    rule: Option<(usize, i64, i64)>,
}

/// Schemas of integer parameters; constrained ones accept 0, 1 and 2.
///
/// Rules only reference earlier parameters, so each trigger is final by the
/// time its rule runs and the dependency invariant holds unconditionally.
fn schema_shapes() -> impl Strategy<Value = Vec<ParamShape>> {
    prop::collection::vec(
        (
            any::<bool>(),
            0i64..3,
            prop::option::of((any::<Index>(), 0i64..3, 0i64..3)),
        ),
        1..=MAX_PARAMS,
    )
    .prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (constrained, default, rule))| ParamShape {
                constrained,
                default,
                rule: if i == 0 {
                    None
                } else {
                    rule.map(|(idx, value, set)| (idx.index(i), value, set))
                },
            })
            .collect()
    })
}

/// Candidate values; 3 is outside every choice set.
fn candidate_values() -> impl Strategy<Value = Vec<Option<i64>>> {
    prop::collection::vec(prop::option::of(0i64..4), MAX_PARAMS)
}

fn name(i: usize) -> String {
    format!("p{}", i)
}

fn build_schema(shapes: &[ParamShape]) -> Schema {
    let entries = shapes.iter().enumerate().map(|(i, shape)| {
        let mut spec = ParameterSpec::new(shape.default);
        if shape.constrained {
            spec = spec.with_choices([0i64, 1, 2]);
        }
        if let Some((trigger, value, set)) = shape.rule {
            spec = spec.with_dependency(DependencyRule::new(name(trigger), value, set));
        }
        (name(i), spec)
    });
    Schema::from_parameters(entries).expect("generated schema is consistent")
}

fn build_candidate(shapes: &[ParamShape], values: &[Option<i64>]) -> Configuration {
    shapes
        .iter()
        .zip(values)
        .enumerate()
        .filter_map(|(i, (_, value))| value.map(|v| (name(i), ParamValue::from(v))))
        .collect()
}

fn assert_invariants(schema: &Schema, config: &Configuration) -> Result<(), TestCaseError> {
    let keys: Vec<&str> = config.keys().map(String::as_str).collect();
    let expected: Vec<&str> = schema.names().collect();
    prop_assert_eq!(keys, expected);

    for (key, spec) in schema.iter() {
        let value = &config[key];
        prop_assert!(spec.constraint.allows(value), "{} violates its choices", key);
        if let Some(rule) = &spec.dependency {
            if values_match(&config[rule.parameter.as_str()], &rule.value) {
                prop_assert!(values_match(value, &rule.set), "{} violates its rule", key);
            }
        }
    }
    Ok(())
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn prop_success_iff_all_choices_valid(
        shapes in schema_shapes(),
        values in candidate_values(),
    ) {
        let schema = build_schema(&shapes);
        let candidate = build_candidate(&shapes, &values);
        let expect_failure = shapes
            .iter()
            .zip(&values)
            .any(|(shape, value)| shape.constrained && *value == Some(3));

        match validate(candidate, &schema) {
            Ok(_) => prop_assert!(!expect_failure),
            Err(ValidationError::InvalidChoice { key, value, allowed }) => {
                prop_assert!(expect_failure);
                prop_assert_eq!(value, ParamValue::from(3));
                prop_assert_eq!(allowed.len(), 3);
                prop_assert!(schema.get(&key).unwrap().choices().is_some());
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }

    #[test]
    fn prop_result_satisfies_invariants(
        shapes in schema_shapes(),
        values in candidate_values(),
    ) {
        let schema = build_schema(&shapes);
        let candidate = build_candidate(&shapes, &values);

        if let Ok(report) = validate(candidate.clone(), &schema) {
            assert_invariants(&schema, &report.config)?;

            // Default-fill: absent and never overridden means default.
            for (key, spec) in schema.iter() {
                let overridden = report
                    .dependencies_enforced()
                    .any(|n| n.parameter() == key);
                if !candidate.contains_key(key) && !overridden {
                    prop_assert_eq!(&report.config[key], &spec.default);
                }
            }

            // Exactly the absent keys got a default notice, in schema order.
            let filled: Vec<&str> = report.defaults_applied().map(Notice::parameter).collect();
            let absent: Vec<&str> = schema.names().filter(|k| !candidate.contains_key(*k)).collect();
            prop_assert_eq!(filled, absent);
        }
    }

    #[test]
    fn prop_revalidation_is_idempotent(
        shapes in schema_shapes(),
        values in candidate_values(),
    ) {
        let schema = build_schema(&shapes);
        if let Ok(first) = validate(build_candidate(&shapes, &values), &schema) {
            let second = validate(first.config.clone(), &schema).unwrap();
            prop_assert_eq!(&second.config, &first.config);
            prop_assert!(second.notices.is_empty());
        }
    }

    #[test]
    fn prop_unknown_key_always_rejected(
        shapes in schema_shapes(),
        values in candidate_values(),
    ) {
        let schema = build_schema(&shapes);
        let mut candidate = build_candidate(&shapes, &values);
        candidate.insert("not_a_parameter".to_string(), ParamValue::from(1));

        prop_assert_eq!(
            validate(candidate, &schema).unwrap_err(),
            ValidationError::UnknownParameter { key: "not_a_parameter".to_string() }
        );
    }

    #[test]
    fn prop_null_value_always_rejected(
        shapes in schema_shapes(),
        target in any::<Index>(),
    ) {
        let schema = build_schema(&shapes);
        let key = name(target.index(shapes.len()));
        let mut candidate = Configuration::new();
        candidate.insert(key.clone(), ParamValue::Null);

        prop_assert_eq!(
            validate(candidate, &schema).unwrap_err(),
            ValidationError::MissingValue { key }
        );
    }

    #[test]
    fn prop_default_dump_is_complete(shapes in schema_shapes()) {
        let schema = build_schema(&shapes);
        let defaults = default_config(&schema);
        prop_assert_eq!(defaults.len(), schema.len());
        for (key, spec) in schema.iter() {
            prop_assert_eq!(&defaults[key], &spec.default);
        }
    }
}
