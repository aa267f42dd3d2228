//! Command handlers for CLI subcommands

pub mod preview;
pub mod submit;
pub mod validate;

pub use preview::handle_preview;
pub use submit::handle_submit;
pub use validate::handle_validate;

use crate::cli::{SampleName, SchemaSource};
use crate::error::{Error, Result};
use colored::Colorize;
use schemaform_core::{data_from_json, defaults_for, samples, ErrorMap, FormData, Schema};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Load the schema from a file or a built-in sample
pub(crate) fn load_schema(source: &SchemaSource) -> Result<Schema> {
    if let Some(sample) = source.sample {
        debug!(sample = sample.as_str(), "using built-in sample schema");
        let schema = match sample {
            SampleName::Basic => samples::basic(),
            SampleName::Select => samples::select(),
            SampleName::Complex => samples::complex(),
        };
        return Ok(schema);
    }

    let Some(path) = source.schema.as_deref() else {
        return Err(Error::Other(anyhow::anyhow!(
            "either a schema file or --sample is required"
        )));
    };
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = content.len(), "schema file read");
    Ok(Schema::from_json_str(&content)?)
}

/// Load form data from a file, or fall back to the schema defaults
pub(crate) fn load_data(schema: &Schema, path: Option<&Path>) -> Result<FormData> {
    let Some(path) = path else {
        return Ok(defaults_for(schema.fields()));
    };
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path)?;
    let json: serde_json::Value = serde_json::from_str(&content)?;
    Ok(data_from_json(schema.fields(), &json))
}

/// Print an error map for human consumption
pub(crate) fn print_error_map(errors: &ErrorMap) {
    for (path, message) in errors {
        eprintln!("  {} {}: {}", "✗".red(), path.bold(), message);
    }
}
