//! mlhep-config - Command-line interface for ML-HEP configuration validation.
//!
//! # Usage
//!
//! ```bash
//! # Validate a configuration and print the completed result
//! mlhep-config validate my_config.yml
//!
//! # Validate and save the completed result
//! mlhep-config validate my_config.yml --output validated.yml
//!
//! # Dump the schema defaults as a starting point
//! mlhep-config dump-defaults ~/ml_config.yml
//!
//! # Inspect the schema
//! mlhep-config schema --format table
//! mlhep-config --schema custom_parameters.yml check-schema
//! ```

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::GlobalOptions;

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::print_error(&format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let options = GlobalOptions {
        format: cli.format,
        quiet: cli.quiet,
        schema: cli.schema,
    };

    match cli.command {
        Commands::Validate(args) => commands::validate::execute(args, &options)?,
        Commands::DumpDefaults(args) => commands::dump_defaults::execute(args, &options)?,
        Commands::Schema(args) => commands::schema::execute(args, &options)?,
        Commands::CheckSchema(args) => commands::schema::execute_check(args, &options)?,
    }

    Ok(())
}

/// Logs go to stderr; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "error",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
