//! Schemaform CLI - validate, preview, and submit schema-driven forms
//!
//! This is the main entry point for the `schemaform` binary. A form schema
//! is a JSON sequence of field definitions; the CLI checks it, renders its
//! widget tree, or runs a full validated submission against an endpoint.

mod cli;
mod error;
mod handlers;
mod logging;

use cli::{Cli, Commands};
use colored::control;
use colored::Colorize;
use error::Result;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    control::set_override(cli.use_color());
    logging::init(cli.verbosity_level(), cli.quiet);

    match run(cli).await {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            process::exit(e.exit_code());
        }
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<()> {
    tracing::debug!(command = ?cli.command, "executing command");
    match cli.command {
        Commands::Validate(args) => handlers::handle_validate(args, cli.output),
        Commands::Preview(args) => handlers::handle_preview(args, cli.output),
        Commands::Submit(args) => handlers::handle_submit(args, cli.output).await,
    }
}
