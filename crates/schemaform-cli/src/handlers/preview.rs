//! Preview command handler: print the rendered widget tree

use super::{load_data, load_schema};
use crate::cli::{OutputFormat, PreviewArgs};
use crate::error::Result;
use colored::Colorize;
use schemaform_core::{render_form, validate_form, Control, RenderedField};

/// Handle the preview command
pub fn handle_preview(args: PreviewArgs, output: OutputFormat) -> Result<()> {
    let schema = load_schema(&args.source)?;
    let data = load_data(&schema, args.data.as_deref())?;
    let errors = validate_form(&schema, &data);
    let rendered = render_form(&schema, &data, &errors);

    match output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&rendered)?);
        }
        OutputFormat::Human => {
            for field in &rendered {
                print_field(field, 0);
            }
        }
    }
    Ok(())
}

fn print_field(field: &RenderedField, depth: usize) {
    let indent = "  ".repeat(depth);
    let marker = if field.required { "*" } else { " " };
    println!(
        "{}{}{} {}",
        indent,
        field.label.bold(),
        marker,
        describe(&field.control).dimmed()
    );
    if let Some(error) = &field.error {
        println!("{}  {} {}", indent, "!".red(), error.red());
    }
    if let Control::Group { children } = &field.control {
        for child in children {
            print_field(child, depth + 1);
        }
    }
}

fn describe(control: &Control) -> String {
    match control {
        Control::Input {
            input_type,
            value,
            min,
            max,
            ..
        } => {
            let mut text = format!("[{:?} input]", input_type).to_lowercase();
            if min.is_some() || max.is_some() {
                text.push_str(&format!(
                    " ({}..{})",
                    min.as_deref().unwrap_or(""),
                    max.as_deref().unwrap_or("")
                ));
            }
            if !value.is_empty() {
                text.push_str(&format!(" = {:?}", value));
            }
            text
        }
        Control::TextArea { value, .. } => {
            if value.is_empty() {
                "[textarea]".to_string()
            } else {
                format!("[textarea] = {:?}", value)
            }
        }
        Control::Select { options, selected, .. } => format!(
            "[select: {} options]{}",
            options.len(),
            selection_suffix(selected.as_deref())
        ),
        Control::CheckList { options, selected, .. } => format!(
            "[multiselect: {} options] = {:?}",
            options.len(),
            selected
        ),
        Control::ButtonGroup { options, selected } => format!(
            "[buttons: {} options]{}",
            options.len(),
            selection_suffix(selected.as_deref())
        ),
        Control::Typeahead { suggestions, text, .. } => {
            if text.is_empty() {
                format!("[typeahead: {} suggestions]", suggestions.len())
            } else {
                format!("[typeahead: {} suggestions] = {:?}", suggestions.len(), text)
            }
        }
        Control::FileDrop { target, uploaded } => {
            if uploaded.is_some() {
                format!("[file upload -> {}] (uploaded)", target.url)
            } else {
                format!("[file upload -> {}]", target.url)
            }
        }
        Control::Group { children } => format!("[card: {} fields]", children.len()),
    }
}

fn selection_suffix(selected: Option<&str>) -> String {
    match selected {
        Some(id) => format!(" = {:?}", id),
        None => String::new(),
    }
}
