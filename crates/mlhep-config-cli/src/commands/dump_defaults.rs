//! Dump-defaults command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use mlhep_config::write_defaults;

use super::GlobalOptions;
use crate::output::print_success;

/// Arguments for the dump-defaults command.
#[derive(Args, Debug)]
pub struct DumpDefaultsArgs {
    /// Destination file (.yml, .yaml or .json); a leading `~` is the home directory
    pub path: PathBuf,
}

/// Execute the dump-defaults command.
pub fn execute(args: DumpDefaultsArgs, options: &GlobalOptions) -> Result<()> {
    let schema = options.load_schema()?;

    let written = write_defaults(&args.path, &schema)
        .with_context(|| format!("Could not write defaults to {}", args.path.display()))?;

    if !options.quiet {
        print_success(&format!(
            "Wrote {} default parameters to {}",
            schema.len(),
            written.display()
        ));
    }
    Ok(())
}
