//! End-to-end validation scenarios.
//!
//! Schemas and candidates are written as YAML, the way users write them.

use mlhep_config::{
    default_config, load_schema, read_config, validate, write_defaults, ConfigError, Configuration,
    Notice, ParamValue, Schema, ValidationError,
};

// =============================================================================
// HELPERS
// =============================================================================

const MODE_DEPTH_SCHEMA: &str = r#"
mode:
  default: fast
depth:
  default: 1
  choices: [1, 2, 3]
"#;

const GPU_SCHEMA: &str = r#"
useGpu:
  default: false
  choices: [true, false]
batchSize:
  default: 32
  depends:
    parameter: useGpu
    value: true
    set: 128
"#;

fn schema(text: &str) -> Schema {
    Schema::from_yaml_str(text).expect("schema")
}

fn candidate(text: &str) -> Configuration {
    mlhep_config::ConfigFormat::Yaml
        .decode(text)
        .expect("candidate")
}

// =============================================================================
// SCENARIOS
// =============================================================================

#[test]
fn scenario_a_invalid_choice() {
    let err = validate(candidate("depth: 5\n"), &schema(MODE_DEPTH_SCHEMA)).unwrap_err();
    assert_eq!(
        err,
        ValidationError::InvalidChoice {
            key: "depth".to_string(),
            value: ParamValue::from(5),
            allowed: vec![ParamValue::from(1), ParamValue::from(2), ParamValue::from(3)],
        }
    );
}

#[test]
fn scenario_b_empty_candidate_takes_defaults() {
    let report = validate(candidate("{}\n"), &schema(MODE_DEPTH_SCHEMA)).unwrap();

    assert_eq!(report.config, candidate("mode: fast\ndepth: 1\n"));
    assert_eq!(
        report.notices,
        vec![
            Notice::DefaultApplied {
                parameter: "mode".to_string(),
                value: ParamValue::from("fast"),
            },
            Notice::DefaultApplied {
                parameter: "depth".to_string(),
                value: ParamValue::from(1),
            },
        ]
    );
}

#[test]
fn scenario_c_dependency_forces_value() {
    let report = validate(
        candidate("useGpu: true\nbatchSize: 32\n"),
        &schema(GPU_SCHEMA),
    )
    .unwrap();

    assert_eq!(report.config, candidate("useGpu: true\nbatchSize: 128\n"));
    assert_eq!(
        report.notices,
        vec![Notice::DependencyEnforced {
            parameter: "batchSize".to_string(),
            value: ParamValue::from(128),
            trigger: "useGpu".to_string(),
            trigger_value: ParamValue::from(true),
        }]
    );
}

#[test]
fn scenario_d_unknown_parameter() {
    for text in [MODE_DEPTH_SCHEMA, GPU_SCHEMA] {
        let err = validate(candidate("typo: 1\n"), &schema(text)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownParameter {
                key: "typo".to_string()
            }
        );
    }
}

// =============================================================================
// PROPERTIES ON FIXED INPUTS
// =============================================================================

#[test]
fn null_value_is_missing() {
    let err = validate(candidate("mode:\n"), &schema(MODE_DEPTH_SCHEMA)).unwrap_err();
    assert_eq!(
        err,
        ValidationError::MissingValue {
            key: "mode".to_string()
        }
    );
}

#[test]
fn dependency_ignores_candidate_value() {
    let report = validate(
        candidate("useGpu: true\nbatchSize: 7\n"),
        &schema(GPU_SCHEMA),
    )
    .unwrap();
    assert_eq!(report.config["batchSize"], ParamValue::from(128));
}

#[test]
fn dependency_not_triggered_keeps_candidate_value() {
    let report = validate(
        candidate("useGpu: false\nbatchSize: 7\n"),
        &schema(GPU_SCHEMA),
    )
    .unwrap();
    assert_eq!(report.config["batchSize"], ParamValue::from(7));
    assert!(report.notices.is_empty());
}

#[test]
fn revalidating_valid_config_is_unchanged() {
    let schema = schema(GPU_SCHEMA);
    let first = validate(candidate("useGpu: true\n"), &schema).unwrap();
    let second = validate(first.config.clone(), &schema).unwrap();
    assert_eq!(second.config, first.config);
    assert!(second.notices.is_empty());
}

#[test]
fn choice_check_precedes_dependency_enforcement() {
    // An invalid choice fails even when a rule would have overwritten it.
    let schema = schema(
        r#"
mode:
  default: fast
  choices: [fast, slow]
depth:
  default: 1
  choices: [1, 2, 3]
  depends: {parameter: mode, value: slow, set: 3}
"#,
    );
    let err = validate(candidate("mode: slow\ndepth: 9\n"), &schema).unwrap_err();
    assert_eq!(err.key(), "depth");
}

// =============================================================================
// BUNDLED SCHEMA
// =============================================================================

#[test]
fn bundled_schema_rejects_misspelled_training_flag() {
    let schema = load_schema().unwrap();
    let err = validate(candidate("dotaining: true\n"), &schema).unwrap_err();
    assert_eq!(
        err,
        ValidationError::UnknownParameter {
            key: "dotaining".to_string()
        }
    );
}

#[test]
fn bundled_schema_regression_disables_classification_outputs() {
    let schema = load_schema().unwrap();
    let report = validate(
        candidate("mltype: Regression\ndoROC: true\ndoboundary: true\ndosignifopt: true\n"),
        &schema,
    )
    .unwrap();

    assert_eq!(report.config["doROC"], ParamValue::from(false));
    assert_eq!(report.config["doboundary"], ParamValue::from(false));
    // dosignifopt is declared after doROC and sees its override.
    assert_eq!(report.config["dosignifopt"], ParamValue::from(false));

    let forced: Vec<&str> = report
        .dependencies_enforced()
        .map(|n| n.parameter())
        .collect();
    assert_eq!(forced, vec!["doROC", "doboundary", "dosignifopt"]);
}

#[test]
fn bundled_defaults_validate_cleanly() {
    let schema = load_schema().unwrap();
    let defaults = default_config(&schema);
    let report = validate(defaults.clone(), &schema).unwrap();
    assert_eq!(report.config, defaults);
    assert!(report.notices.is_empty());
}

// =============================================================================
// DEFAULT DUMP
// =============================================================================

#[test]
fn default_dump_round_trips_through_validation() {
    let schema = schema(GPU_SCHEMA);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("defaults.yml");

    write_defaults(&path, &schema).unwrap();
    let dumped = read_config(&path).unwrap();

    let names: Vec<&str> = dumped.keys().map(String::as_str).collect();
    assert_eq!(names, schema.names().collect::<Vec<_>>());
    for (name, spec) in schema.iter() {
        assert_eq!(dumped[name], spec.default);
    }

    let report = validate(dumped, &schema).unwrap();
    assert!(report.notices.is_empty());
}

#[test]
fn default_dump_rejects_unknown_extension() {
    let dir = tempfile::tempdir().unwrap();
    let result = write_defaults(dir.path().join("defaults.ini"), &schema(GPU_SCHEMA));
    assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
}
