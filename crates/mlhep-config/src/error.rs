//! Configuration error types.

use thiserror::Error;

use crate::diagnostics::Severity;
use crate::value::{display_value, display_values, ParamValue};

/// Configuration operation result type.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Fatal outcome of a single validation run.
///
/// Only the first condition encountered is ever reported.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// The candidate names a parameter the schema does not know.
    #[error("Unknown parameter {key} in config")]
    UnknownParameter {
        /// The unrecognized key.
        key: String,
    },

    /// The candidate names a parameter but gives it no value.
    #[error("Missing value for parameter {key} in config")]
    MissingValue {
        /// The key mapped to null.
        key: String,
    },

    /// The candidate value is not one of the parameter's allowed choices.
    #[error(
        "Invalid value {} for parameter {key}, allowed values are {}",
        display_value(.value),
        display_values(.allowed)
    )]
    InvalidChoice {
        /// The constrained key.
        key: String,
        /// The rejected value.
        value: ParamValue,
        /// The allowed set, in schema order.
        allowed: Vec<ParamValue>,
    },
}

impl ValidationError {
    /// Returns the offending parameter name.
    pub fn key(&self) -> &str {
        match self {
            Self::UnknownParameter { key }
            | Self::MissingValue { key }
            | Self::InvalidChoice { key, .. } => key,
        }
    }

    /// Validation errors are always fatal.
    pub fn severity(&self) -> Severity {
        Severity::Error
    }
}

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The reference schema could not be read or parsed.
    #[error("Schema unavailable: {0}")]
    SchemaUnavailable(String),

    /// The reference schema parsed but is internally inconsistent.
    #[error("Invalid schema entry '{parameter}': {reason}")]
    SchemaInvalid {
        /// Parameter whose entry is broken.
        parameter: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A candidate configuration failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Configuration file extension is not a known format.
    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Deserialization error.
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// Creates a schema consistency error.
    pub fn schema_invalid(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SchemaInvalid {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            ConfigError::Deserialization(err.to_string())
        } else {
            ConfigError::Serialization(err.to_string())
        }
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Deserialization(err.to_string())
    }
}
