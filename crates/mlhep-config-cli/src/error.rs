//! CLI error types.

use mlhep_config::{ConfigError, ValidationError};
use thiserror::Error;

/// CLI error type.
///
/// Messages name the failing input; the underlying cause is the error source.
#[derive(Debug, Error)]
pub enum CliError {
    /// The candidate configuration failed validation.
    #[error("Invalid configuration {path}")]
    InvalidConfig {
        /// Configuration file that was checked.
        path: String,
        /// First validation failure.
        #[source]
        source: ValidationError,
    },

    /// The reference schema could not be loaded.
    #[error("Could not load schema from {origin}")]
    Schema {
        /// Where the schema was read from.
        origin: String,
        /// Load failure.
        #[source]
        source: ConfigError,
    },
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
