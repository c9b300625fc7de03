//! ML-HEP Configuration Layer
//!
//! Validates, completes and normalizes user configurations for the ML-HEP
//! analysis pipeline against a reference schema before anything downstream
//! runs.
//!
//! # Features
//!
//! - **Schema**: per-parameter default, optional choices, optional dependency rule
//! - **Validation**: unknown/empty key rejection, default filling, choice checks,
//!   single-pass dependency enforcement
//! - **Diagnostics**: advisory notices returned next to the result, never printed
//! - **Default dumps**: a configuration holding exactly the schema defaults
//! - **Codecs**: YAML and JSON configuration files
//!
//! # Example
//!
//! ```rust
//! use mlhep_config::{validate, Configuration, Notice, ParamValue, Schema};
//!
//! let schema = Schema::from_yaml_str(
//!     r#"
//! useGpu:
//!   default: false
//!   choices: [true, false]
//! batchSize:
//!   default: 32
//!   depends: {parameter: useGpu, value: true, set: 128}
//! "#,
//! )
//! .unwrap();
//!
//! let mut candidate = Configuration::new();
//! candidate.insert("useGpu".to_string(), ParamValue::from(true));
//!
//! let report = validate(candidate, &schema).unwrap();
//! assert_eq!(report.config["batchSize"], ParamValue::from(128));
//! assert!(matches!(report.notices[0], Notice::DefaultApplied { .. }));
//! assert!(matches!(report.notices[1], Notice::DependencyEnforced { .. }));
//! ```
//!
//! # Failure
//!
//! Validation is fail-closed. The first unknown parameter, missing value or
//! invalid choice aborts the run and no partial configuration is returned.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod codec;
mod defaults;
mod diagnostics;
mod error;
mod schema;
mod store;
mod validator;
mod value;

// Re-export core types
pub use codec::{expand_home, read_config, write_config, ConfigFormat};
pub use defaults::{default_config, write_defaults};
pub use diagnostics::{Diagnostic, Notice, Severity};
pub use error::{ConfigError, ConfigResult, ValidationError};
pub use schema::{Constraint, DependencyRule, ParameterSpec, Schema};
pub use store::{load_schema, BundledSchema, FileSchema, SchemaSource, BUNDLED_SCHEMA};
pub use validator::{validate, ConfigValidator, ValidationReport};
pub use value::{display_value, display_values, values_match, Configuration, ParamValue};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{ConfigError, ConfigResult, ValidationError};
    pub use crate::schema::{ParameterSpec, Schema};
    pub use crate::store::SchemaSource;
    pub use crate::validator::{validate, ConfigValidator, ValidationReport};
    pub use crate::value::{Configuration, ParamValue};
}
