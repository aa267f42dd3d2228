//! Interaction events and how they produce the next field value
//!
//! The embedding UI translates raw widget interactions into [`FieldEvent`]s
//! and feeds the result of [`apply_event`] back into
//! [`FormState::set_value`](crate::form::FormState::set_value). This keeps
//! the toggle/choose semantics in one tested place instead of in every
//! frontend.

use crate::value::FieldValue;
use serde_json::Value;

/// A user interaction on one field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEvent {
    /// Text edited in an input, textarea, or typeahead
    Edit(String),
    /// An option chosen in a select or button group
    Choose(String),
    /// A multiselect option toggled on or off
    Toggle(String),
    /// A multiselect chip removed
    Remove(String),
    /// A completed upload's JSON result accepted as the field value
    Accept(Value),
}

/// Compute the next value from the current one and an interaction.
///
/// Toggling appends to or removes from the selection, preserving whatever
/// order the toggles produced.
pub fn apply_event(current: Option<&FieldValue>, event: FieldEvent) -> FieldValue {
    match event {
        FieldEvent::Edit(text) => FieldValue::Text(text),
        FieldEvent::Choose(id) => FieldValue::Text(id),
        FieldEvent::Accept(json) => FieldValue::Upload(json),
        FieldEvent::Toggle(id) => {
            let mut selected = current_selection(current);
            match selected.iter().position(|s| s == &id) {
                Some(pos) => {
                    selected.remove(pos);
                }
                None => selected.push(id),
            }
            FieldValue::Many(selected)
        }
        FieldEvent::Remove(id) => {
            let mut selected = current_selection(current);
            selected.retain(|s| s != &id);
            FieldValue::Many(selected)
        }
    }
}

fn current_selection(current: Option<&FieldValue>) -> Vec<String> {
    current
        .and_then(FieldValue::as_many)
        .map(<[String]>::to_vec)
        .unwrap_or_default()
}
