//! CLI command implementations.

pub mod dump_defaults;
pub mod schema;
pub mod validate;

// Re-export submodules for convenience
pub use dump_defaults::DumpDefaultsArgs;
pub use schema::{CheckSchemaArgs, SchemaArgs};
pub use validate::ValidateArgs;

use std::path::PathBuf;

use mlhep_config::{BundledSchema, FileSchema, Schema, SchemaSource};
use tracing::debug;

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};

/// Options shared by every command.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Output format.
    pub format: OutputFormat,
    /// Suppress notices and success messages.
    pub quiet: bool,
    /// Schema file overriding the bundled schema.
    pub schema: Option<PathBuf>,
}

impl GlobalOptions {
    /// Returns the configured schema source.
    pub fn schema_source(&self) -> Box<dyn SchemaSource> {
        match &self.schema {
            Some(path) => Box::new(FileSchema::new(path)),
            None => Box::new(BundledSchema),
        }
    }

    /// Loads the configured schema.
    pub fn load_schema(&self) -> CliResult<Schema> {
        let schema_source = self.schema_source();
        let schema = schema_source
            .load_schema()
            .map_err(|source| CliError::Schema {
                origin: schema_source.describe(),
                source,
            })?;
        debug!(
            origin = %schema_source.describe(),
            parameters = schema.len(),
            "schema loaded"
        );
        Ok(schema)
    }
}
