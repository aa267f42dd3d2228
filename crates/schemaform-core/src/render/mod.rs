//! Stateless mapping from field definitions to presentation widgets
//!
//! Dispatch is a closed match on [`FieldKind`]: every type gets exactly one
//! control, cards recurse into a group, and unrecognized type tags already
//! fell back to plain text when the schema was decoded. The renderer holds
//! no state of its own: the same schema, data, and error map always produce
//! the same widget tree.

pub mod event;
pub mod widget;

pub use event::{apply_event, FieldEvent};
pub use widget::{Control, InputType, RenderedField};

use crate::schema::{join_path, FieldKind, FieldSpec, Schema};
use crate::validation::ErrorMap;
use crate::value::{FieldValue, FormData};

/// Render a whole schema against its current data and errors
pub fn render_form(schema: &Schema, data: &FormData, errors: &ErrorMap) -> Vec<RenderedField> {
    schema
        .fields()
        .iter()
        .map(|field| render_field(field, data.get(&field.name), errors, ""))
        .collect()
}

/// Render one field.
///
/// `prefix` is the dotted path of the containing card ("" at the top
/// level); it scopes the error-map lookups for the field and, for cards,
/// its children.
pub fn render_field(
    field: &FieldSpec,
    value: Option<&FieldValue>,
    errors: &ErrorMap,
    prefix: &str,
) -> RenderedField {
    let path = join_path(prefix, &field.name);
    let error = errors.get(&path).filter(|e| !e.is_empty()).cloned();
    let text = || {
        value
            .and_then(FieldValue::as_text)
            .unwrap_or_default()
            .to_string()
    };
    let chosen = || value.and_then(FieldValue::as_text).filter(|s| !s.is_empty()).map(str::to_string);

    let control = match &field.kind {
        FieldKind::Text => scalar_input(field, InputType::Text, text()),
        FieldKind::Email => scalar_input(field, InputType::Email, text()),
        FieldKind::Tel => scalar_input(field, InputType::Tel, text()),
        FieldKind::Number => bounded_input(field, InputType::Number, text()),
        FieldKind::Date => bounded_input(field, InputType::Date, text()),
        FieldKind::DateTime => bounded_input(field, InputType::Datetime, text()),
        FieldKind::TextArea => Control::TextArea {
            placeholder: field.placeholder.clone(),
            value: text(),
        },
        FieldKind::Select { options } => Control::Select {
            options: options.clone(),
            selected: chosen(),
            placeholder: field.placeholder.clone(),
        },
        FieldKind::MultiSelect { options } => {
            let selected = value
                .and_then(FieldValue::as_many)
                .map(<[String]>::to_vec)
                .unwrap_or_default();
            let chips = selected
                .iter()
                .filter_map(|id| options.iter().find(|o| &o.id == id).cloned())
                .collect();
            Control::CheckList {
                options: options.clone(),
                selected,
                chips,
            }
        }
        FieldKind::Buttons { options } => Control::ButtonGroup {
            options: options.clone(),
            selected: chosen(),
        },
        FieldKind::Typeahead { options } => Control::Typeahead {
            suggestions: options.clone(),
            text: text(),
            placeholder: field.placeholder.clone(),
        },
        FieldKind::File { target } => Control::FileDrop {
            target: target.clone(),
            uploaded: match value {
                Some(FieldValue::Upload(json)) if !json.is_null() => Some(json.clone()),
                _ => None,
            },
        },
        FieldKind::Card { fields } => {
            let nested = value.and_then(FieldValue::as_nested);
            let children = fields
                .iter()
                .map(|child| {
                    render_field(
                        child,
                        nested.and_then(|n| n.get(&child.name)),
                        errors,
                        &path,
                    )
                })
                .collect();
            Control::Group { children }
        }
    };

    RenderedField {
        name: field.name.clone(),
        label: field.title.clone(),
        required: field.required,
        error,
        control,
    }
}

fn scalar_input(field: &FieldSpec, input_type: InputType, value: String) -> Control {
    Control::Input {
        input_type,
        placeholder: field.placeholder.clone(),
        value,
        min: None,
        max: None,
        step: None,
    }
}

fn bounded_input(field: &FieldSpec, input_type: InputType, value: String) -> Control {
    Control::Input {
        input_type,
        placeholder: field.placeholder.clone(),
        value,
        min: field.min.clone(),
        max: field.max.clone(),
        step: field.resolution.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::defaults_for;
    use serde_json::json;

    fn schema() -> Schema {
        Schema::from_value(json!([
            {
                "title": "Age", "name": "age", "type": "number",
                "min": "18", "max": "99", "resolution": "1", "placeholder": "Your age"
            },
            {
                "title": "Stack", "name": "stack", "type": "multiselect",
                "data": [
                    {"id": "react", "title": "React"},
                    {"id": "vue", "title": "Vue"},
                    {"id": "svelte", "title": "Svelte"}
                ]
            },
            {
                "title": "Contact", "name": "contact", "type": "buttons",
                "data": [{"id": "email", "title": "Email"}, {"id": "phone", "title": "Phone"}]
            },
            {
                "title": "Education", "name": "education", "type": "card",
                "data": [
                    {"title": "Institution", "name": "institution", "type": "text", "required": true}
                ]
            }
        ]))
        .unwrap()
    }

    #[test]
    fn test_number_input_passes_constraints_through() {
        let schema = schema();
        let data = defaults_for(schema.fields());
        let rendered = render_form(&schema, &data, &ErrorMap::new());

        match &rendered[0].control {
            Control::Input {
                input_type,
                min,
                max,
                step,
                ..
            } => {
                assert_eq!(*input_type, InputType::Number);
                assert_eq!(min.as_deref(), Some("18"));
                assert_eq!(max.as_deref(), Some("99"));
                assert_eq!(step.as_deref(), Some("1"));
            }
            other => panic!("expected input, got {:?}", other),
        }
    }

    #[test]
    fn test_checklist_resolves_chips_in_toggle_order() {
        let schema = schema();
        let mut data = defaults_for(schema.fields());
        data.insert(
            "stack".to_string(),
            FieldValue::Many(vec!["vue".to_string(), "react".to_string(), "gone".to_string()]),
        );
        let rendered = render_form(&schema, &data, &ErrorMap::new());

        match &rendered[1].control {
            Control::CheckList { selected, chips, .. } => {
                assert_eq!(selected, &["vue", "react", "gone"]);
                // unknown ids render no chip
                let titles: Vec<&str> = chips.iter().map(|c| c.title.as_str()).collect();
                assert_eq!(titles, ["Vue", "React"]);
            }
            other => panic!("expected checklist, got {:?}", other),
        }
    }

    #[test]
    fn test_card_children_pick_up_dotted_errors() {
        let schema = schema();
        let data = defaults_for(schema.fields());
        let mut errors = ErrorMap::new();
        errors.insert(
            "education.institution".to_string(),
            "Institution is required".to_string(),
        );
        let rendered = render_form(&schema, &data, &errors);

        match &rendered[3].control {
            Control::Group { children } => {
                assert_eq!(children[0].error.as_deref(), Some("Institution is required"));
                assert!(children[0].is_invalid());
            }
            other => panic!("expected group, got {:?}", other),
        }
        assert!(!rendered[3].is_invalid());
    }

    #[test]
    fn test_button_group_selection() {
        let schema = schema();
        let mut data = defaults_for(schema.fields());
        data.insert("contact".to_string(), "phone".into());
        let rendered = render_form(&schema, &data, &ErrorMap::new());
        match &rendered[2].control {
            Control::ButtonGroup { selected, options } => {
                assert_eq!(selected.as_deref(), Some("phone"));
                assert_eq!(options.len(), 2);
            }
            other => panic!("expected button group, got {:?}", other),
        }
    }

    #[test]
    fn test_unrecognized_type_renders_plain_text_input() {
        let schema = Schema::from_value(json!([
            {"title": "Mystery", "name": "mystery", "type": "hologram"}
        ]))
        .unwrap();
        let data = defaults_for(schema.fields());
        let rendered = render_form(&schema, &data, &ErrorMap::new());
        match &rendered[0].control {
            Control::Input { input_type, .. } => assert_eq!(*input_type, InputType::Text),
            other => panic!("expected input, got {:?}", other),
        }
    }

    #[test]
    fn test_view_model_serializes() {
        let schema = schema();
        let data = defaults_for(schema.fields());
        let json = serde_json::to_value(render_form(&schema, &data, &ErrorMap::new())).unwrap();
        assert_eq!(json[0]["control"]["widget"], "input");
        assert_eq!(json[3]["control"]["widget"], "group");
    }
}
