//! Submit command handler: run the full orchestrator flow against a real
//! endpoint

use super::{load_data, load_schema, print_error_map};
use crate::cli::{OutputFormat, SubmitArgs};
use crate::error::{Error, Result};
use colored::Colorize;
use schemaform_core::{FieldValue, FormData, FormState, SubmitOutcome};
use serde_json::json;
use tracing::info;

/// Handle the submit command.
///
/// Seeds a [`FormState`] through its change dispatch (so each entry is
/// re-validated exactly as an interactive edit would be), then submits with
/// an HTTP POST of the assembled data as the external handler.
pub async fn handle_submit(args: SubmitArgs, output: OutputFormat) -> Result<()> {
    let schema = load_schema(&args.source)?;
    let data = load_data(&schema, args.data.as_deref())?;

    let mut form = FormState::new(schema);
    seed(&mut form, &data, "");

    let url = args.to.clone();
    let client = reqwest::Client::new();
    let outcome = form
        .submit(move |data| async move {
            let response = client.post(&url).json(&data).send().await?;
            response.error_for_status()?;
            Ok(())
        })
        .await;

    match outcome {
        SubmitOutcome::Submitted => {
            info!(url = %args.to, "form submitted");
            match output {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&json!({"submitted": true}))?);
                }
                OutputFormat::Human => println!("{} submitted to {}", "✓".green(), args.to),
            }
            Ok(())
        }
        SubmitOutcome::Rejected => {
            match output {
                OutputFormat::Json => {
                    let report = json!({"submitted": false, "errors": form.errors()});
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
                OutputFormat::Human => {
                    eprintln!("{}", "Submission blocked by validation errors:".red().bold());
                    print_error_map(form.errors());
                }
            }
            Err(Error::ValidationFailed {
                count: form.errors().len(),
            })
        }
        SubmitOutcome::Failed => {
            let message = form
                .submit_error()
                .unwrap_or("submit handler failed")
                .to_string();
            if output == OutputFormat::Json {
                let report = json!({"submitted": false, "submit_error": message});
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            Err(Error::SubmissionFailed(message))
        }
    }
}

/// Push every leaf of a loaded value tree through the form's change dispatch
fn seed(form: &mut FormState, data: &FormData, prefix: &str) {
    for (name, value) in data {
        let path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{}.{}", prefix, name)
        };
        match value {
            FieldValue::Nested(nested) => seed(form, nested, &path),
            other => form.set_value(&path, other.clone()),
        }
    }
}
