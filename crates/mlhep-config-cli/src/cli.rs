//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{CheckSchemaArgs, DumpDefaultsArgs, SchemaArgs, ValidateArgs};

/// mlhep-config - Validate and complete ML-HEP analysis configurations
#[derive(Parser)]
#[command(name = "mlhep-config")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "yaml", global = true)]
    pub format: OutputFormat,

    /// Suppress notices and success messages
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reference schema file (defaults to the bundled schema)
    #[arg(long, env = "MLHEP_SCHEMA", global = true)]
    pub schema: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Validate a configuration file and print the completed configuration
    Validate(ValidateArgs),

    /// Write a configuration holding only the schema defaults
    DumpDefaults(DumpDefaultsArgs),

    /// List the parameters declared by the schema
    Schema(SchemaArgs),

    /// Load the schema and report whether it is consistent
    CheckSchema(CheckSchemaArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// YAML, ready to save as a configuration file
    #[default]
    Yaml,
    /// Human-readable table format
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (key=value lines)
    Minimal,
}
