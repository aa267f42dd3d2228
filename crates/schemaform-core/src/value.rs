//! The mutable value tree mirroring a schema's shape
//!
//! Every non-card field maps to a scalar, a selection sequence, or an
//! uploaded-file result; every card field maps to a nested [`FormData`]
//! keyed by the child names.

use crate::schema::{DefaultValue, FieldKind, FieldSpec};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Mapping from field name to its current value
pub type FormData = BTreeMap<String, FieldValue>;

/// One field's current value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Scalar value of every text-like, select, buttons, or typeahead field
    Text(String),
    /// Selected option ids of a multiselect field, in toggle order
    Many(Vec<String>),
    /// JSON response stored verbatim by a completed upload
    Upload(Value),
    /// Sub-form values of a card field
    Nested(FormData),
}

impl FieldValue {
    /// Empty means: empty string, zero-length sequence, or no upload yet
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Many(items) => items.is_empty(),
            FieldValue::Upload(value) => value.is_null(),
            FieldValue::Nested(data) => data.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_many(&self) -> Option<&[String]> {
        match self {
            FieldValue::Many(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_nested(&self) -> Option<&FormData> {
        match self {
            FieldValue::Nested(data) => Some(data),
            _ => None,
        }
    }

    /// String form used by the pattern rule and range parsing
    pub fn display_string(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Many(items) => items.join(","),
            FieldValue::Upload(value) => match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            },
            FieldValue::Nested(data) => serde_json::to_value(data)
                .map(|v| v.to_string())
                .unwrap_or_default(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::Many(items)
    }
}

impl FieldSpec {
    /// The initial value for this field: its declared default, else the
    /// per-kind empty value. Cards recurse over their children so the value
    /// tree always mirrors the schema's shape.
    pub fn default_value(&self) -> FieldValue {
        match &self.kind {
            FieldKind::Card { fields } => FieldValue::Nested(defaults_for(fields)),
            FieldKind::MultiSelect { .. } => match &self.default {
                Some(DefaultValue::Many(items)) => FieldValue::Many(items.clone()),
                Some(DefaultValue::One(s)) if !s.is_empty() => FieldValue::Many(vec![s.clone()]),
                _ => FieldValue::Many(Vec::new()),
            },
            FieldKind::File { .. } => FieldValue::Upload(Value::Null),
            _ => match &self.default {
                Some(DefaultValue::One(s)) => FieldValue::Text(s.clone()),
                _ => FieldValue::Text(String::new()),
            },
        }
    }
}

/// Build the default value tree for a sequence of field definitions
pub fn defaults_for(fields: &[FieldSpec]) -> FormData {
    fields
        .iter()
        .map(|field| (field.name.clone(), field.default_value()))
        .collect()
}

/// Interpret an untyped JSON object against a schema.
///
/// Starts from the schema defaults and overlays whatever the object
/// supplies, coercing each entry to the field's kind: arrays of strings for
/// multiselect, objects for cards (recursive), verbatim JSON for file
/// fields, stringified scalars for everything else. Entries for unknown
/// names and absent entries keep their defaults.
pub fn data_from_json(fields: &[FieldSpec], json: &Value) -> FormData {
    let mut data = defaults_for(fields);
    let Some(object) = json.as_object() else {
        return data;
    };
    for field in fields {
        let Some(supplied) = object.get(&field.name) else {
            continue;
        };
        let value = match &field.kind {
            FieldKind::Card { fields } => FieldValue::Nested(data_from_json(fields, supplied)),
            FieldKind::MultiSelect { .. } => FieldValue::Many(string_items(supplied)),
            FieldKind::File { .. } => FieldValue::Upload(supplied.clone()),
            _ => FieldValue::Text(scalar_string(supplied)),
        };
        data.insert(field.name.clone(), value);
    }
    data
}

fn string_items(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().map(scalar_string).collect(),
        Value::Null => Vec::new(),
        other => vec![scalar_string(other)],
    }
}

fn scalar_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;
    use serde_json::json;

    fn schema() -> Schema {
        Schema::from_value(json!([
            {"title": "Name", "name": "name", "type": "text", "value": "Ada"},
            {
                "title": "Stack",
                "name": "stack",
                "type": "multiselect",
                "value": ["react"],
                "data": [{"id": "react", "title": "React"}, {"id": "vue", "title": "Vue"}]
            },
            {
                "title": "Education",
                "name": "education",
                "type": "card",
                "data": [
                    {"title": "Institution", "name": "institution", "type": "text"},
                    {"title": "Year", "name": "year", "type": "number"}
                ]
            }
        ]))
        .unwrap()
    }

    #[test]
    fn test_defaults_mirror_schema_shape() {
        let data = defaults_for(schema().fields());
        assert_eq!(data["name"], FieldValue::Text("Ada".to_string()));
        assert_eq!(data["stack"], FieldValue::Many(vec!["react".to_string()]));

        let nested = data["education"].as_nested().unwrap();
        assert_eq!(nested["institution"], FieldValue::Text(String::new()));
        assert_eq!(nested["year"], FieldValue::Text(String::new()));
    }

    #[test]
    fn test_emptiness() {
        assert!(FieldValue::Text(String::new()).is_empty());
        assert!(FieldValue::Many(Vec::new()).is_empty());
        assert!(FieldValue::Upload(Value::Null).is_empty());
        assert!(!FieldValue::Text("x".to_string()).is_empty());
        assert!(!FieldValue::Upload(json!({"id": 7})).is_empty());
    }

    #[test]
    fn test_data_from_json_overlays_defaults() {
        let schema = schema();
        let data = data_from_json(
            schema.fields(),
            &json!({
                "stack": ["vue", "react"],
                "education": {"year": 2019},
                "unknown": "dropped"
            }),
        );
        // untouched entries keep their defaults
        assert_eq!(data["name"], FieldValue::Text("Ada".to_string()));
        assert_eq!(
            data["stack"],
            FieldValue::Many(vec!["vue".to_string(), "react".to_string()])
        );
        let nested = data["education"].as_nested().unwrap();
        assert_eq!(nested["year"], FieldValue::Text("2019".to_string()));
        assert!(!data.contains_key("unknown"));
    }

    #[test]
    fn test_display_string_joins_sequences() {
        let value = FieldValue::Many(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(value.display_string(), "a,b");
    }

    #[test]
    fn test_serializes_to_plain_json() {
        let data = data_from_json(schema().fields(), &json!({"stack": ["vue"]}));
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["name"], "Ada");
        assert_eq!(json["stack"], json!(["vue"]));
        assert!(json["education"].is_object());
    }
}
