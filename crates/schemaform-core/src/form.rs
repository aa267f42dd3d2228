//! Form orchestrator: owns the value tree and error map for one form
//!
//! [`FormState`] is the single owner of the mutable state behind a rendered
//! form: the [`FormData`] tree, the [`ErrorMap`], the submitting flag, and
//! the form-level submission error. Editing flows through [`set_value`]
//! (re-validating only the changed field); submission re-validates the
//! whole tree before the external handler ever runs.
//!
//! [`set_value`]: FormState::set_value

use crate::schema::{join_path, PathIndex, Schema};
use crate::validation::{validate_field, validate_form, ErrorMap};
use crate::value::{defaults_for, FieldValue, FormData};
use std::future::Future;
use tracing::debug;

/// How one submission attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation passed and the submit handler completed
    Submitted,
    /// Outstanding validation errors; the handler was never called
    Rejected,
    /// The submit handler itself failed; see [`FormState::submit_error`]
    Failed,
}

/// Mutable state for one rendered form instance.
///
/// The schema is supplied once and treated as immutable; assigning a new
/// schema via [`set_schema`](FormState::set_schema) reinitializes everything.
#[derive(Debug)]
pub struct FormState {
    schema: Schema,
    index: PathIndex,
    data: FormData,
    errors: ErrorMap,
    submitting: bool,
    submit_error: Option<String>,
}

impl FormState {
    /// Create a form over a schema, with every field at its default value
    pub fn new(schema: Schema) -> Self {
        let index = schema.index();
        let data = defaults_for(schema.fields());
        Self {
            schema,
            index,
            data,
            errors: ErrorMap::new(),
            submitting: false,
            submit_error: None,
        }
    }

    /// Replace the schema and rebuild all state from scratch
    pub fn set_schema(&mut self, schema: Schema) {
        *self = Self::new(schema);
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn data(&self) -> &FormData {
        &self.data
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// The form-level error from the last failed submit handler, if any
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// Current value at a dotted path
    pub fn value_at(&self, path: &str) -> Option<&FieldValue> {
        let segments: Vec<&str> = path.split('.').collect();
        get_at(&self.data, &segments)
    }

    /// Current validation message at a dotted path
    pub fn error_at(&self, path: &str) -> Option<&str> {
        self.errors.get(path).map(String::as_str)
    }

    /// Replace the value at a dotted path and re-validate only that field.
    ///
    /// Works at any card depth; intermediate sub-form maps are created as
    /// needed. Exactly one error-map entry is inserted or removed. Changes
    /// addressed at an unknown path are ignored.
    pub fn set_value(&mut self, path: &str, value: FieldValue) {
        let Some(field) = self.index.resolve(&self.schema, path) else {
            debug!(path, "change for unknown field path ignored");
            return;
        };

        let segments: Vec<&str> = path.split('.').collect();
        if field.is_card() {
            // Replacing a whole sub-form: re-validate the subtree instead of
            // a single entry.
            insert_at(&mut self.data, &segments, value);
            let sub_schema = Schema::new(field.children().unwrap_or(&[]).to_vec());
            let nested = get_at(&self.data, &segments)
                .and_then(FieldValue::as_nested)
                .cloned()
                .unwrap_or_default();
            let prefix = format!("{}.", path);
            self.errors
                .retain(|key, _| key.as_str() != path && !key.starts_with(&prefix));
            for (key, message) in validate_form(&sub_schema, &nested) {
                self.errors.insert(join_path(path, &key), message);
            }
            return;
        }

        insert_at(&mut self.data, &segments, value);
        match validate_field(field, get_at(&self.data, &segments)) {
            Some(message) => {
                debug!(path, %message, "field invalid after change");
                self.errors.insert(path.to_string(), message);
            }
            None => {
                self.errors.remove(path);
            }
        }
    }

    /// Change a top-level field by name
    pub fn set_field(&mut self, name: &str, value: FieldValue) {
        self.set_value(name, value);
    }

    /// Change a field inside a card's sub-form
    pub fn set_nested_field(&mut self, card: &str, name: &str, value: FieldValue) {
        self.set_value(&join_path(card, name), value);
    }

    /// Attempt submission.
    ///
    /// Re-validates the entire tree first; with outstanding errors the
    /// handler is never called and the errors are surfaced. Otherwise the
    /// handler receives the assembled data; any failure it returns is
    /// caught into [`submit_error`](FormState::submit_error). The
    /// submitting flag always resets on completion.
    pub async fn submit<F, Fut>(&mut self, handler: F) -> SubmitOutcome
    where
        F: FnOnce(FormData) -> Fut,
        Fut: Future<Output = anyhow::Result<()>>,
    {
        self.submitting = true;
        self.submit_error = None;

        let found = validate_form(&self.schema, &self.data);
        let outcome = if !found.is_empty() {
            debug!(errors = found.len(), "submission rejected by validation");
            self.errors = found;
            SubmitOutcome::Rejected
        } else {
            self.errors.clear();
            match handler(self.data.clone()).await {
                Ok(()) => SubmitOutcome::Submitted,
                Err(err) => {
                    debug!(error = %err, "submit handler failed");
                    self.submit_error = Some(err.to_string());
                    SubmitOutcome::Failed
                }
            }
        };

        self.submitting = false;
        outcome
    }
}

fn get_at<'a>(data: &'a FormData, segments: &[&str]) -> Option<&'a FieldValue> {
    let (first, rest) = segments.split_first()?;
    let value = data.get(*first)?;
    if rest.is_empty() {
        Some(value)
    } else {
        get_at(value.as_nested()?, rest)
    }
}

fn insert_at(data: &mut FormData, segments: &[&str], value: FieldValue) {
    let Some((first, rest)) = segments.split_first() else {
        return;
    };
    if rest.is_empty() {
        data.insert(first.to_string(), value);
        return;
    }
    let entry = data
        .entry(first.to_string())
        .or_insert_with(|| FieldValue::Nested(FormData::new()));
    if !matches!(entry, FieldValue::Nested(_)) {
        *entry = FieldValue::Nested(FormData::new());
    }
    if let FieldValue::Nested(nested) = entry {
        insert_at(nested, rest, value);
    }
}
