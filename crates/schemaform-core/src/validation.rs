//! Per-field rule checks and whole-tree validation
//!
//! [`validate_field`] checks one value against one field's rule set and
//! returns a display message on the first failing rule. [`validate_form`]
//! walks a schema recursively and collects every failure into a flat
//! [`ErrorMap`] keyed by dotted field path (`card.child` inside cards, bare
//! names at the top level). Nothing here panics or returns `Err`: a field
//! validation failure is user feedback, not a fault.

use crate::schema::{join_path, FieldKind, FieldSpec, Schema};
use crate::value::{FieldValue, FormData};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::collections::BTreeMap;

/// Flat mapping of dotted field paths to validation messages.
/// Absence of a key means the field is valid.
pub type ErrorMap = BTreeMap<String, String>;

/// Compile a validator pattern anchored to the whole string.
///
/// The pattern rule requires the full stringified value to satisfy the
/// pattern, so `\A(?:pat)\z` anchors are added here.
pub(crate) fn compile_anchored(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"\A(?:{})\z", pattern))
}

fn message(field: &FieldSpec, default: String) -> String {
    field.error.clone().unwrap_or(default)
}

/// Check one field's value against its rules, in fixed order, first
/// failure wins. `None` means the value is missing entirely, which counts
/// as empty. Returns `None` when the value is valid.
pub fn validate_field(field: &FieldSpec, value: Option<&FieldValue>) -> Option<String> {
    let empty = value.map_or(true, FieldValue::is_empty);

    if field.required && empty {
        return Some(message(field, format!("{} is required", field.title)));
    }
    // Empty and not required: no further rule applies
    if empty {
        return None;
    }

    let text = value.map(FieldValue::display_string).unwrap_or_default();

    if let Some(pattern) = &field.validator {
        let matched = match compile_anchored(pattern) {
            Ok(re) => re.is_match(&text),
            // Uncompilable pattern fails the field closed; Schema::check
            // reports it to the schema author up front.
            Err(_) => false,
        };
        if !matched {
            return Some(message(field, format!("Invalid {}", field.title)));
        }
    }

    match &field.kind {
        FieldKind::Number => validate_number(field, &text),
        FieldKind::Date | FieldKind::DateTime => validate_date(field, &text),
        _ => None,
    }
}

fn validate_number(field: &FieldSpec, text: &str) -> Option<String> {
    let number = match text.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => return Some(message(field, format!("{} must be a number", field.title))),
    };
    // Bounds that do not parse are ignored, matching the original engine
    if let Some(min) = bound(field.min.as_deref()) {
        if number < min {
            return Some(message(
                field,
                format!("{} must be at least {}", field.title, field.min.as_deref().unwrap_or("")),
            ));
        }
    }
    if let Some(max) = bound(field.max.as_deref()) {
        if number > max {
            return Some(message(
                field,
                format!("{} must be at most {}", field.title, field.max.as_deref().unwrap_or("")),
            ));
        }
    }
    None
}

fn bound(raw: Option<&str>) -> Option<f64> {
    raw?.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn validate_date(field: &FieldSpec, text: &str) -> Option<String> {
    let Some(instant) = parse_instant(text) else {
        return Some(message(field, format!("{} must be a valid date", field.title)));
    };
    if let Some(min) = field.min.as_deref().and_then(parse_instant) {
        if instant < min {
            return Some(message(
                field,
                format!("{} must be after {}", field.title, field.min.as_deref().unwrap_or("")),
            ));
        }
    }
    if let Some(max) = field.max.as_deref().and_then(parse_instant) {
        if instant > max {
            return Some(message(
                field,
                format!("{} must be before {}", field.title, field.max.as_deref().unwrap_or("")),
            ));
        }
    }
    None
}

/// Parse the date/datetime layouts the engine accepts: plain dates,
/// `datetime-local` values with or without seconds, and RFC 3339.
fn parse_instant(text: &str) -> Option<NaiveDateTime> {
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    for layout in ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, layout) {
            return Some(dt);
        }
    }
    DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.naive_utc())
}

/// Validate an entire value tree against a schema.
///
/// Card fields recurse into their nested data (an empty tree when absent)
/// with the dotted path as prefix; every other field records a non-empty
/// result under its dotted path. An empty map means the form is valid.
pub fn validate_form(schema: &Schema, data: &FormData) -> ErrorMap {
    let mut errors = ErrorMap::new();
    validate_level(schema.fields(), data, "", &mut errors);
    errors
}

fn validate_level(fields: &[FieldSpec], data: &FormData, prefix: &str, errors: &mut ErrorMap) {
    let absent = FormData::new();
    for field in fields {
        let path = join_path(prefix, &field.name);
        match &field.kind {
            FieldKind::Card { fields: children } => {
                let nested = data
                    .get(&field.name)
                    .and_then(FieldValue::as_nested)
                    .unwrap_or(&absent);
                validate_level(children, nested, &path, errors);
            }
            _ => {
                if let Some(msg) = validate_field(field, data.get(&field.name)) {
                    errors.insert(path, msg);
                }
            }
        }
    }
}
