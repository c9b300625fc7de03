//! Default configuration dumps.
//!
//! Defaults are taken from the schema as-is. They are not checked against
//! choices or dependency rules; keeping them consistent is the schema
//! author's job.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::codec::write_config;
use crate::error::ConfigResult;
use crate::schema::Schema;
use crate::value::Configuration;

/// Builds a configuration holding every schema default, in schema order.
pub fn default_config(schema: &Schema) -> Configuration {
    schema
        .iter()
        .map(|(name, spec)| (name.to_string(), spec.default.clone()))
        .collect()
}

/// Writes the schema defaults to `path` and returns the path written.
///
/// A leading `~` expands to the home directory. The format follows the file
/// extension (YAML unless it ends in `.json`).
pub fn write_defaults(path: impl AsRef<Path>, schema: &Schema) -> ConfigResult<PathBuf> {
    let config = default_config(schema);
    let written = write_config(path, &config)?;
    info!(
        path = %written.display(),
        parameters = config.len(),
        "default configuration written"
    );
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::read_config;
    use crate::schema::{DependencyRule, ParameterSpec};
    use crate::value::ParamValue;

    fn schema() -> Schema {
        Schema::from_parameters(vec![
            ("useGpu", ParameterSpec::new(false).with_choices([true, false])),
            (
                "batchSize",
                ParameterSpec::new(32).with_dependency(DependencyRule::new("useGpu", true, 128)),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_default_config_matches_schema() {
        let schema = schema();
        let config = default_config(&schema);
        let keys: Vec<&str> = config.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["useGpu", "batchSize"]);
        assert_eq!(config["useGpu"], ParamValue::from(false));
        assert_eq!(config["batchSize"], ParamValue::from(32));
    }

    #[test]
    fn test_defaults_are_not_checked() {
        // Default outside its own choices is written verbatim.
        let schema = Schema::from_parameters(vec![(
            "depth",
            ParameterSpec::new(7).with_choices([1, 2, 3]),
        )])
        .unwrap();
        assert_eq!(default_config(&schema)["depth"], ParamValue::from(7));
    }

    #[test]
    fn test_write_defaults_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("defaults.yml");

        let written = write_defaults(&path, &schema()).unwrap();
        assert_eq!(written, path);

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "useGpu: false\nbatchSize: 32\n");
        assert_eq!(read_config(&path).unwrap(), default_config(&schema()));
    }
}
