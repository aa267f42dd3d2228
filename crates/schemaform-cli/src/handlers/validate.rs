//! Validation command handler

use super::{load_data, load_schema, print_error_map};
use crate::cli::{OutputFormat, ValidateArgs};
use crate::error::{Error, Result};
use colored::Colorize;
use schemaform_core::validate_form;
use serde_json::json;
use tracing::info;

/// Handle the validate command: check schema structure first, then run the
/// full-tree validation over the supplied (or default) form data.
pub fn handle_validate(args: ValidateArgs, output: OutputFormat) -> Result<()> {
    let schema = load_schema(&args.source)?;

    let problems = schema.check();
    if !problems.is_empty() {
        eprintln!("{}", "Schema is not well-formed:".red().bold());
        for problem in &problems {
            eprintln!("  {} {}", "✗".red(), problem);
        }
        return Err(Error::ValidationFailed {
            count: problems.len(),
        });
    }
    info!(fields = schema.fields().len(), "schema is well-formed");

    let data = load_data(&schema, args.data.as_deref())?;
    let errors = validate_form(&schema, &data);

    match output {
        OutputFormat::Json => {
            let report = json!({
                "valid": errors.is_empty(),
                "errors": errors,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Human => {
            if errors.is_empty() {
                println!("{} form data is valid", "✓".green());
            } else {
                eprintln!("{}", "Validation errors:".red().bold());
                print_error_map(&errors);
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(Error::ValidationFailed {
            count: errors.len(),
        })
    }
}
