//! Schema inspection commands.

use anyhow::Result;
use clap::Args;
use mlhep_config::{display_value, display_values, ParameterSpec, Schema};
use serde::Serialize;
use tabled::Tabled;

use super::GlobalOptions;
use crate::cli::OutputFormat;
use crate::output::{print_header, print_output, print_success};

/// Arguments for the schema command.
#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Show only this parameter
    pub parameter: Option<String>,
}

/// Arguments for the check-schema command.
#[derive(Args, Debug)]
pub struct CheckSchemaArgs {}

/// One schema entry flattened for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct ParameterRow {
    #[tabled(rename = "Parameter")]
    pub parameter: String,
    #[tabled(rename = "Default")]
    pub default: String,
    #[tabled(rename = "Choices")]
    pub choices: String,
    #[tabled(rename = "Depends")]
    pub depends: String,
    #[tabled(rename = "Description")]
    pub description: String,
}

impl ParameterRow {
    fn new(name: &str, spec: &ParameterSpec) -> Self {
        Self {
            parameter: name.to_string(),
            default: display_value(&spec.default),
            choices: spec.choices().map(display_values).unwrap_or_default(),
            depends: spec
                .dependency
                .as_ref()
                .map(|rule| {
                    format!(
                        "{} if {} == {}",
                        display_value(&rule.set),
                        rule.parameter,
                        display_value(&rule.value)
                    )
                })
                .unwrap_or_default(),
            description: spec.description.clone().unwrap_or_default(),
        }
    }
}

fn rows(schema: &Schema, only: Option<&str>) -> Result<Vec<ParameterRow>> {
    match only {
        Some(name) => {
            let spec = schema
                .get(name)
                .ok_or_else(|| anyhow::anyhow!("Unknown parameter: {}", name))?;
            Ok(vec![ParameterRow::new(name, spec)])
        }
        None => Ok(schema
            .iter()
            .map(|(name, spec)| ParameterRow::new(name, spec))
            .collect()),
    }
}

/// Execute the schema command.
pub fn execute(args: SchemaArgs, options: &GlobalOptions) -> Result<()> {
    let schema = options.load_schema()?;
    let rows = rows(&schema, args.parameter.as_deref())?;

    if options.format == OutputFormat::Table {
        print_header("Schema Parameters");
    }
    print_output(&rows, options.format)
}

/// Execute the check-schema command.
pub fn execute_check(_args: CheckSchemaArgs, options: &GlobalOptions) -> Result<()> {
    let schema = options.load_schema()?;

    if !options.quiet {
        let constrained = schema.iter().filter(|(_, s)| s.choices().is_some()).count();
        let rules = schema.iter().filter(|(_, s)| s.dependency.is_some()).count();
        print_success(&format!(
            "Schema {} is consistent: {} parameters, {} with choices, {} dependency rules",
            options.schema_source().describe(),
            schema.len(),
            constrained,
            rules
        ));
    }
    Ok(())
}
