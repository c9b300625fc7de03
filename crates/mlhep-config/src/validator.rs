//! Candidate configuration validation.
//!
//! Validation runs three ordered passes against the reference schema:
//!
//! 1. **Rejection** - every candidate key must be known to the schema and carry
//!    a value. A misspelled key must fail loudly, otherwise the real parameter
//!    would silently fall back to its default.
//! 2. **Completion** - schema keys missing from the candidate take their default;
//!    supplied values must satisfy the parameter's choices.
//! 3. **Dependency enforcement** - each dependency rule is evaluated once, in
//!    schema order, against the configuration as it stands at that moment.
//!
//! The first failure aborts the run. Pass 3 is single-pass and order-sensitive:
//! a rule observes an override made by another rule only if that rule's
//! parameter is declared earlier in the schema.

use tracing::{debug, info, warn};

use crate::diagnostics::{Diagnostic, Notice};
use crate::error::ValidationError;
use crate::schema::Schema;
use crate::value::{values_match, Configuration};

// =============================================================================
// VALIDATION REPORT
// =============================================================================

/// Outcome of a successful validation run.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    /// Completed configuration, one entry per schema key in schema order.
    pub config: Configuration,
    /// Advisory notices in the order they were raised.
    pub notices: Vec<Notice>,
}

impl ValidationReport {
    /// Consumes the report, returning the validated configuration.
    pub fn into_config(self) -> Configuration {
        self.config
    }

    /// Notices for parameters that took their default.
    pub fn defaults_applied(&self) -> impl Iterator<Item = &Notice> {
        self.notices
            .iter()
            .filter(|n| matches!(n, Notice::DefaultApplied { .. }))
    }

    /// Notices for parameters overwritten by a dependency rule.
    pub fn dependencies_enforced(&self) -> impl Iterator<Item = &Notice> {
        self.notices
            .iter()
            .filter(|n| matches!(n, Notice::DependencyEnforced { .. }))
    }

    /// Flattens the notices into diagnostics.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.notices.iter().map(Diagnostic::from).collect()
    }
}

// =============================================================================
// VALIDATOR
// =============================================================================

/// Validates candidate configurations against a borrowed schema.
///
/// # Example
///
/// ```rust
/// use mlhep_config::{ConfigValidator, Configuration, Schema};
///
/// let schema = Schema::from_yaml_str(
///     "mode:\n  default: fast\ndepth:\n  default: 1\n  choices: [1, 2, 3]\n",
/// )
/// .unwrap();
///
/// let report = ConfigValidator::new(&schema)
///     .validate(Configuration::new())
///     .unwrap();
/// assert_eq!(report.config.len(), 2);
/// assert_eq!(report.notices.len(), 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ConfigValidator<'a> {
    schema: &'a Schema,
}

impl<'a> ConfigValidator<'a> {
    /// Creates a validator for the given schema.
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Validates, completes and normalizes a candidate configuration.
    pub fn validate(&self, candidate: Configuration) -> Result<ValidationReport, ValidationError> {
        debug!(parameters = candidate.len(), "validating candidate configuration");

        if let Err(err) = self.reject_unknown_and_empty(&candidate) {
            warn!(parameter = err.key(), "{}", err);
            return Err(err);
        }

        let mut notices = Vec::new();
        let mut config = match self.complete(candidate, &mut notices) {
            Ok(config) => config,
            Err(err) => {
                warn!(parameter = err.key(), "{}", err);
                return Err(err);
            }
        };

        self.enforce_dependencies(&mut config, &mut notices);

        debug!(
            parameters = config.len(),
            notices = notices.len(),
            "configuration validated"
        );
        Ok(ValidationReport { config, notices })
    }

    /// Pass 1: every candidate key is known and carries a value.
    fn reject_unknown_and_empty(&self, candidate: &Configuration) -> Result<(), ValidationError> {
        for (key, value) in candidate {
            if !self.schema.contains(key) {
                return Err(ValidationError::UnknownParameter { key: key.clone() });
            }
            if value.is_null() {
                return Err(ValidationError::MissingValue { key: key.clone() });
            }
        }
        Ok(())
    }

    /// Pass 2: fill defaults and check choices, rebuilding in schema order.
    fn complete(
        &self,
        mut candidate: Configuration,
        notices: &mut Vec<Notice>,
    ) -> Result<Configuration, ValidationError> {
        let mut config = Configuration::with_capacity(self.schema.len());

        for (key, spec) in self.schema.iter() {
            match candidate.swap_remove(key) {
                None => {
                    info!(parameter = key, value = ?spec.default, "using default value");
                    notices.push(Notice::DefaultApplied {
                        parameter: key.to_string(),
                        value: spec.default.clone(),
                    });
                    config.insert(key.to_string(), spec.default.clone());
                }
                Some(value) => {
                    if !spec.constraint.allows(&value) {
                        return Err(ValidationError::InvalidChoice {
                            key: key.to_string(),
                            value,
                            allowed: spec.choices().unwrap_or_default().to_vec(),
                        });
                    }
                    config.insert(key.to_string(), value);
                }
            }
        }

        debug_assert!(candidate.is_empty(), "pass 1 admits only schema keys");
        Ok(config)
    }

    /// Pass 3: apply each dependency rule once, in schema order.
    fn enforce_dependencies(&self, config: &mut Configuration, notices: &mut Vec<Notice>) {
        for (key, spec) in self.schema.iter() {
            let Some(rule) = &spec.dependency else {
                continue;
            };
            if !rule.is_triggered_by(config) {
                continue;
            }
            if config
                .get(key)
                .is_some_and(|current| values_match(current, &rule.set))
            {
                continue;
            }

            info!(
                parameter = key,
                value = ?rule.set,
                trigger = %rule.parameter,
                "dependency enforced"
            );
            // Existing key: IndexMap keeps its position.
            config.insert(key.to_string(), rule.set.clone());
            notices.push(Notice::DependencyEnforced {
                parameter: key.to_string(),
                value: rule.set.clone(),
                trigger: rule.parameter.clone(),
                trigger_value: rule.value.clone(),
            });
        }
    }
}

/// Validates `candidate` against `schema`.
///
/// Shorthand for [`ConfigValidator::new`] followed by [`ConfigValidator::validate`].
pub fn validate(
    candidate: Configuration,
    schema: &Schema,
) -> Result<ValidationReport, ValidationError> {
    ConfigValidator::new(schema).validate(candidate)
}
