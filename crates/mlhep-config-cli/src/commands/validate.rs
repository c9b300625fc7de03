//! Validate command implementation.
//!
//! Reads a candidate configuration, completes it against the schema and
//! prints (or writes) the result. Notices go to stderr.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use mlhep_config::{read_config, validate, write_config};

use super::GlobalOptions;
use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output::{print_config, print_header, print_info, print_success};

/// Arguments for the validate command.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Configuration file (.yml, .yaml or .json)
    pub config: PathBuf,

    /// Write the validated configuration to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute the validate command.
pub fn execute(args: ValidateArgs, options: &GlobalOptions) -> Result<()> {
    let schema = options.load_schema()?;

    let candidate = read_config(&args.config)
        .with_context(|| format!("Could not read configuration {}", args.config.display()))?;

    let report = validate(candidate, &schema).map_err(|source| CliError::InvalidConfig {
        path: args.config.display().to_string(),
        source,
    })?;

    if !options.quiet {
        for notice in &report.notices {
            print_info(&notice.to_string());
        }
    }
    let config = report.into_config();

    match args.output {
        Some(output) => {
            let written = write_config(&output, &config)
                .with_context(|| format!("Could not write {}", output.display()))?;
            if !options.quiet {
                print_success(&format!(
                    "Validated configuration written to {}",
                    written.display()
                ));
            }
        }
        None => {
            if options.format == OutputFormat::Table {
                print_header("Validated Configuration");
            }
            print_config(&config, options.format)?;
        }
    }

    Ok(())
}
