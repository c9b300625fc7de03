//! Reference schema types.
//!
//! The schema is decoded once from its YAML mapping, checked for internal
//! consistency, and never mutated afterwards. Declaration order is kept: every
//! validation pass walks the schema in that order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::error::{ConfigError, ConfigResult};
use crate::value::{display_value, values_match, Configuration, ParamValue};

// =============================================================================
// CONSTRAINT
// =============================================================================

/// Constraint on the values a parameter accepts.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Constraint {
    /// Any non-null value is accepted.
    #[default]
    Unconstrained,
    /// Only the listed values are accepted.
    Choices(Vec<ParamValue>),
}

impl Constraint {
    /// Returns true if `value` satisfies the constraint.
    pub fn allows(&self, value: &ParamValue) -> bool {
        match self {
            Self::Unconstrained => true,
            Self::Choices(choices) => choices.iter().any(|choice| values_match(choice, value)),
        }
    }

    /// Returns the allowed set, if any.
    pub fn choices(&self) -> Option<&[ParamValue]> {
        match self {
            Self::Unconstrained => None,
            Self::Choices(choices) => Some(choices),
        }
    }
}

// =============================================================================
// DEPENDENCY RULE
// =============================================================================

/// "When `parameter` equals `value`, this parameter must equal `set`."
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DependencyRule {
    /// Parameter whose current value is inspected.
    pub parameter: String,
    /// Value of `parameter` that triggers the rule.
    pub value: ParamValue,
    /// Value forced onto the dependent parameter.
    pub set: ParamValue,
}

impl DependencyRule {
    /// Creates a new dependency rule.
    pub fn new(
        parameter: impl Into<String>,
        value: impl Into<ParamValue>,
        set: impl Into<ParamValue>,
    ) -> Self {
        Self {
            parameter: parameter.into(),
            value: value.into(),
            set: set.into(),
        }
    }

    /// Returns true if the rule fires against the configuration's current state.
    pub fn is_triggered_by(&self, config: &Configuration) -> bool {
        config
            .get(&self.parameter)
            .is_some_and(|current| values_match(current, &self.value))
    }
}

// =============================================================================
// PARAMETER SPEC
// =============================================================================

/// One schema entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    /// Value used when the parameter is absent.
    pub default: ParamValue,
    /// Allowed values.
    pub constraint: Constraint,
    /// Optional conditional override.
    pub dependency: Option<DependencyRule>,
    /// Free-form description, shown by listings only.
    pub description: Option<String>,
}

impl ParameterSpec {
    /// Creates an unconstrained parameter with the given default.
    pub fn new(default: impl Into<ParamValue>) -> Self {
        Self {
            default: default.into(),
            constraint: Constraint::Unconstrained,
            dependency: None,
            description: None,
        }
    }

    /// Builder method to restrict the parameter to a set of choices.
    pub fn with_choices<I, V>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ParamValue>,
    {
        self.constraint = Constraint::Choices(choices.into_iter().map(Into::into).collect());
        self
    }

    /// Builder method to attach a dependency rule.
    pub fn with_dependency(mut self, rule: DependencyRule) -> Self {
        self.dependency = Some(rule);
        self
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the allowed set, if any.
    pub fn choices(&self) -> Option<&[ParamValue]> {
        self.constraint.choices()
    }
}

/// Wire shape of a schema entry.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawParameterSpec {
    #[serde(default)]
    default: ParamValue,
    #[serde(default)]
    choices: Option<Vec<ParamValue>>,
    #[serde(default)]
    depends: Option<DependencyRule>,
    #[serde(default)]
    description: Option<String>,
}

impl From<RawParameterSpec> for ParameterSpec {
    fn from(raw: RawParameterSpec) -> Self {
        Self {
            default: raw.default,
            constraint: raw.choices.map_or(Constraint::Unconstrained, Constraint::Choices),
            dependency: raw.depends,
            description: raw.description,
        }
    }
}

// =============================================================================
// SCHEMA
// =============================================================================

/// The reference schema: parameter name to [`ParameterSpec`], in declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Schema {
    parameters: IndexMap<String, ParameterSpec>,
}

impl Schema {
    /// Builds a schema from already-typed entries, checking consistency.
    pub fn from_parameters<I, K>(parameters: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = (K, ParameterSpec)>,
        K: Into<String>,
    {
        let mut map = IndexMap::new();
        for (name, spec) in parameters {
            let name = name.into();
            if map.contains_key(&name) {
                return Err(ConfigError::schema_invalid(name, "declared more than once"));
            }
            map.insert(name, spec);
        }
        let schema = Self { parameters: map };
        schema.check_consistency()?;
        Ok(schema)
    }

    /// Decodes a schema from its YAML text.
    pub fn from_yaml_str(text: &str) -> ConfigResult<Self> {
        let document: Value = serde_yaml::from_str(text)
            .map_err(|e| ConfigError::SchemaUnavailable(format!("malformed schema: {}", e)))?;
        match document {
            Value::Mapping(mapping) => Self::from_mapping(mapping),
            Value::Null => Err(ConfigError::SchemaUnavailable(
                "schema document is empty".to_string(),
            )),
            _ => Err(ConfigError::SchemaUnavailable(
                "schema document must be a mapping of parameter names".to_string(),
            )),
        }
    }

    /// Decodes a schema from an already-parsed mapping.
    pub fn from_mapping(mapping: Mapping) -> ConfigResult<Self> {
        let mut entries = Vec::with_capacity(mapping.len());
        for (key, entry) in mapping {
            let name = match key {
                Value::String(name) => name,
                other => {
                    return Err(ConfigError::schema_invalid(
                        display_value(&other),
                        "parameter names must be strings",
                    ))
                }
            };
            if !entry.is_mapping() {
                return Err(ConfigError::schema_invalid(name, "entry must be a mapping"));
            }
            let raw: RawParameterSpec = serde_yaml::from_value(entry)
                .map_err(|e| ConfigError::schema_invalid(name.clone(), e.to_string()))?;
            entries.push((name, ParameterSpec::from(raw)));
        }
        Self::from_parameters(entries)
    }

    /// Rejects entries that would make validation or default dumps misbehave.
    fn check_consistency(&self) -> ConfigResult<()> {
        for (name, spec) in &self.parameters {
            if spec.default.is_null() {
                return Err(ConfigError::schema_invalid(name, "missing or null default"));
            }
            if let Some(choices) = spec.choices() {
                if choices.is_empty() {
                    return Err(ConfigError::schema_invalid(name, "choices must not be empty"));
                }
            }
            if let Some(rule) = &spec.dependency {
                let Some(trigger) = self.parameters.get(&rule.parameter) else {
                    return Err(ConfigError::schema_invalid(
                        name,
                        format!("depends on unknown parameter '{}'", rule.parameter),
                    ));
                };
                if rule.set.is_null() {
                    return Err(ConfigError::schema_invalid(
                        name,
                        "dependency must not force a null value",
                    ));
                }
                // A forced value must survive re-validation.
                if !spec.constraint.allows(&rule.set) {
                    return Err(ConfigError::schema_invalid(
                        name,
                        "dependency forces a value outside its choices",
                    ));
                }
                if !trigger.constraint.allows(&rule.value) {
                    return Err(ConfigError::schema_invalid(
                        name,
                        format!(
                            "dependency triggers on a value '{}' never allowed for '{}'",
                            display_value(&rule.value),
                            rule.parameter
                        ),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Returns the entry for `name`.
    pub fn get(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters.get(name)
    }

    /// Returns true if `name` is a known parameter.
    pub fn contains(&self, name: &str) -> bool {
        self.parameters.contains_key(name)
    }

    /// Iterates entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParameterSpec)> {
        self.parameters.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    /// Iterates parameter names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.parameters.keys().map(String::as_str)
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Returns true if the schema declares no parameters.
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}
