//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Schemaform CLI - schema-driven form validation and preview
///
/// Loads a form schema (a JSON sequence of field definitions), optionally
/// overlays a data file, and validates, previews, or submits the result.
#[derive(Parser, Debug)]
#[command(
    name = "schemaform",
    version,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output format for results
    #[arg(short, long, value_enum, global = true, default_value = "human")]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Effective verbosity level, 0 when quiet
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    pub fn use_color(&self) -> bool {
        !self.no_color
    }
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check a schema's structure and validate form data against it
    Validate(ValidateArgs),

    /// Render the schema into its widget tree
    Preview(PreviewArgs),

    /// Validate form data and post it to a submit endpoint
    Submit(SubmitArgs),
}

/// Output format for results
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable terminal output
    Human,
    /// Machine-readable JSON
    Json,
}

/// Where the schema comes from: a file, or a built-in sample
#[derive(Parser, Debug)]
pub struct SchemaSource {
    /// Path to the schema JSON file
    #[arg(value_name = "SCHEMA", required_unless_present = "sample", conflicts_with = "sample")]
    pub schema: Option<PathBuf>,

    /// Use a built-in sample schema instead of a file
    #[arg(long, value_enum)]
    pub sample: Option<SampleName>,
}

/// Built-in demo schemas
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleName {
    Basic,
    Select,
    Complex,
}

impl SampleName {
    pub fn as_str(&self) -> &'static str {
        match self {
            SampleName::Basic => "basic",
            SampleName::Select => "select",
            SampleName::Complex => "complex",
        }
    }
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub source: SchemaSource,

    /// Form data JSON file to validate (schema defaults when omitted)
    #[arg(short, long, value_name = "DATA")]
    pub data: Option<PathBuf>,
}

/// Arguments for the preview command
#[derive(Parser, Debug)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub source: SchemaSource,

    /// Form data JSON file to render (schema defaults when omitted)
    #[arg(short, long, value_name = "DATA")]
    pub data: Option<PathBuf>,
}

/// Arguments for the submit command
#[derive(Parser, Debug)]
pub struct SubmitArgs {
    #[command(flatten)]
    pub source: SchemaSource,

    /// Form data JSON file to submit
    #[arg(short, long, value_name = "DATA")]
    pub data: Option<PathBuf>,

    /// Submit endpoint; the validated form data is POSTed here as JSON
    #[arg(long, value_name = "URL", env = "SCHEMAFORM_SUBMIT_URL")]
    pub to: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_with_sample() {
        let cli = Cli::parse_from(["schemaform", "validate", "--sample", "complex"]);
        match cli.command {
            Commands::Validate(args) => {
                assert_eq!(args.source.sample, Some(SampleName::Complex));
                assert!(args.source.schema.is_none());
            }
            other => panic!("expected validate, got {:?}", other),
        }
    }

    #[test]
    fn test_schema_path_and_data() {
        let cli = Cli::parse_from(["schemaform", "validate", "form.json", "--data", "data.json"]);
        match cli.command {
            Commands::Validate(args) => {
                assert_eq!(args.source.schema.unwrap().to_str(), Some("form.json"));
                assert_eq!(args.data.unwrap().to_str(), Some("data.json"));
            }
            other => panic!("expected validate, got {:?}", other),
        }
    }

    #[test]
    fn test_schema_conflicts_with_sample() {
        let result = Cli::try_parse_from([
            "schemaform", "validate", "form.json", "--sample", "basic",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_submit_requires_url() {
        let result = Cli::try_parse_from(["schemaform", "submit", "--sample", "basic"]);
        assert!(result.is_err());

        let cli = Cli::parse_from([
            "schemaform", "submit", "--sample", "basic", "--to", "https://example.com/forms",
        ]);
        match cli.command {
            Commands::Submit(args) => assert_eq!(args.to, "https://example.com/forms"),
            other => panic!("expected submit, got {:?}", other),
        }
    }

    #[test]
    fn test_verbosity_and_quiet() {
        let cli = Cli::parse_from(["schemaform", "-vv", "validate", "form.json"]);
        assert_eq!(cli.verbosity_level(), 2);

        let cli = Cli::parse_from(["schemaform", "--quiet", "validate", "form.json"]);
        assert_eq!(cli.verbosity_level(), 0);
    }
}
