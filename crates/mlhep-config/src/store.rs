//! Schema sources.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::schema::Schema;

/// Reference parameters shipped with the library.
pub const BUNDLED_SCHEMA: &str = include_str!("../data/config_ml_parameters.yml");

/// Supplies the reference schema.
///
/// Failures are startup errors: the schema is a build artifact, not user input.
pub trait SchemaSource {
    /// Loads and checks the schema.
    fn load_schema(&self) -> ConfigResult<Schema>;

    /// Short human-readable origin, for messages.
    fn describe(&self) -> String;
}

/// The schema compiled into the library.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledSchema;

impl SchemaSource for BundledSchema {
    fn load_schema(&self) -> ConfigResult<Schema> {
        debug!("loading bundled schema");
        Schema::from_yaml_str(BUNDLED_SCHEMA)
    }

    fn describe(&self) -> String {
        "bundled config_ml_parameters.yml".to_string()
    }
}

/// A schema read from a YAML file.
#[derive(Debug, Clone)]
pub struct FileSchema {
    path: PathBuf,
}

impl FileSchema {
    /// Creates a source for the given path.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: crate::codec::expand_home(path),
        }
    }

    /// Returns the schema path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SchemaSource for FileSchema {
    fn load_schema(&self) -> ConfigResult<Schema> {
        debug!(path = %self.path.display(), "loading schema file");
        let text = fs::read_to_string(&self.path).map_err(|e| {
            ConfigError::SchemaUnavailable(format!("{}: {}", self.path.display(), e))
        })?;
        Schema::from_yaml_str(&text)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Loads the bundled reference schema.
pub fn load_schema() -> ConfigResult<Schema> {
    BundledSchema.load_schema()
}
