//! Field-definition model for schema-driven forms
//!
//! A form is described as an ordered sequence of [`FieldSpec`] nodes. The wire
//! format is the original JSON shape: a `type` string plus a polymorphic
//! `data` payload. Internally the payload is a tagged variant per field type
//! ([`FieldKind`]), so every validator and renderer branch receives exactly
//! the shape it needs:
//!
//! - option-list kinds (`select`, `multiselect`, `buttons`, `typeahead`)
//!   carry a `Vec<OptionItem>`,
//! - `file` carries an [`UploadTarget`],
//! - `card` carries a nested `Vec<FieldSpec>` (the sole recursive case).
//!
//! Unrecognized `type` strings fall back to plain text, matching the
//! renderer's fallback behavior.

use crate::error::{Error, Result};
use crate::validation::compile_anchored;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{HashMap, HashSet};
use url::Url;

/// One `{id, title}` choice in an option-list field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionItem {
    pub id: String,
    pub title: String,
}

impl OptionItem {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// Upload endpoint descriptor for `file` fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadTarget {
    pub url: String,
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
}

fn default_method() -> String {
    "POST".to_string()
}

/// Declared default value for a field: a scalar or a selection sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    One(String),
    Many(Vec<String>),
}

/// Typed payload per field type
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Number,
    Date,
    DateTime,
    TextArea,
    Select { options: Vec<OptionItem> },
    MultiSelect { options: Vec<OptionItem> },
    Buttons { options: Vec<OptionItem> },
    Typeahead { options: Vec<OptionItem> },
    File { target: UploadTarget },
    Card { fields: Vec<FieldSpec> },
}

impl FieldKind {
    /// The wire `type` tag for this kind
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Email => "email",
            FieldKind::Tel => "tel",
            FieldKind::Number => "number",
            FieldKind::Date => "date",
            FieldKind::DateTime => "datetime",
            FieldKind::TextArea => "textarea",
            FieldKind::Select { .. } => "select",
            FieldKind::MultiSelect { .. } => "multiselect",
            FieldKind::Buttons { .. } => "buttons",
            FieldKind::Typeahead { .. } => "typeahead",
            FieldKind::File { .. } => "file",
            FieldKind::Card { .. } => "card",
        }
    }

    /// Option list, for the kinds that carry one
    pub fn options(&self) -> Option<&[OptionItem]> {
        match self {
            FieldKind::Select { options }
            | FieldKind::MultiSelect { options }
            | FieldKind::Buttons { options }
            | FieldKind::Typeahead { options } => Some(options),
            _ => None,
        }
    }
}

/// One schema node describing an input
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// Identifier, unique within its containing level
    pub name: String,
    /// Display label, also used in generated error messages
    pub title: String,
    pub placeholder: Option<String>,
    pub required: bool,
    /// Regular-expression pattern the whole stringified value must match
    pub validator: Option<String>,
    /// Lower bound; numeric for `number`, date string for `date`/`datetime`
    pub min: Option<String>,
    pub max: Option<String>,
    /// Input step for `number`
    pub resolution: Option<String>,
    /// Custom message overriding the default for every failure mode
    pub error: Option<String>,
    /// Declared default value
    pub default: Option<DefaultValue>,
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Child definitions, for `card` fields
    pub fn children(&self) -> Option<&[FieldSpec]> {
        match &self.kind {
            FieldKind::Card { fields } => Some(fields),
            _ => None,
        }
    }

    pub fn is_card(&self) -> bool {
        matches!(self.kind, FieldKind::Card { .. })
    }
}

/// Raw mirror of the wire shape, used for (de)serialization
#[derive(Serialize, Deserialize)]
struct RawFieldSpec {
    name: String,
    #[serde(default)]
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    placeholder: Option<String>,
    #[serde(rename = "type", default = "default_type")]
    type_tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<serde_json::Value>,
    #[serde(default)]
    required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    validator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    min: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    resolution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(rename = "value", default, skip_serializing_if = "Option::is_none")]
    default: Option<DefaultValue>,
}

fn default_type() -> String {
    "text".to_string()
}

impl<'de> Deserialize<'de> for FieldSpec {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        fn parse_options<E: DeError>(
            name: &str,
            data: Option<serde_json::Value>,
        ) -> std::result::Result<Vec<OptionItem>, E> {
            match data {
                Some(value) => serde_json::from_value(value).map_err(|e| {
                    E::custom(format!("field '{}': option list expected: {}", name, e))
                }),
                None => Ok(Vec::new()),
            }
        }

        let raw = RawFieldSpec::deserialize(deserializer)?;
        let kind = match raw.type_tag.as_str() {
            "email" => FieldKind::Email,
            "tel" => FieldKind::Tel,
            "number" => FieldKind::Number,
            "date" => FieldKind::Date,
            "datetime" => FieldKind::DateTime,
            "textarea" => FieldKind::TextArea,
            "select" => FieldKind::Select {
                options: parse_options(&raw.name, raw.data)?,
            },
            "multiselect" => FieldKind::MultiSelect {
                options: parse_options(&raw.name, raw.data)?,
            },
            "buttons" => FieldKind::Buttons {
                options: parse_options(&raw.name, raw.data)?,
            },
            "typeahead" => FieldKind::Typeahead {
                options: parse_options(&raw.name, raw.data)?,
            },
            "file" => {
                let data = raw.data.ok_or_else(|| {
                    D::Error::custom(format!("field '{}': file field needs an upload target", raw.name))
                })?;
                let target = serde_json::from_value(data).map_err(|e| {
                    D::Error::custom(format!("field '{}': upload target expected: {}", raw.name, e))
                })?;
                FieldKind::File { target }
            }
            "card" => {
                let data = raw.data.ok_or_else(|| {
                    D::Error::custom(format!("field '{}': card field needs child definitions", raw.name))
                })?;
                let fields = serde_json::from_value(data).map_err(|e| {
                    D::Error::custom(format!("field '{}': child definitions expected: {}", raw.name, e))
                })?;
                FieldKind::Card { fields }
            }
            // "text" and anything unrecognized render as plain text
            _ => FieldKind::Text,
        };

        Ok(FieldSpec {
            name: raw.name,
            title: raw.title,
            placeholder: raw.placeholder,
            required: raw.required,
            validator: raw.validator,
            min: raw.min,
            max: raw.max,
            resolution: raw.resolution,
            error: raw.error,
            default: raw.default,
            kind,
        })
    }
}

impl Serialize for FieldSpec {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let data = match &self.kind {
            FieldKind::Select { options }
            | FieldKind::MultiSelect { options }
            | FieldKind::Buttons { options }
            | FieldKind::Typeahead { options } => {
                Some(serde_json::to_value(options).map_err(serde::ser::Error::custom)?)
            }
            FieldKind::File { target } => {
                Some(serde_json::to_value(target).map_err(serde::ser::Error::custom)?)
            }
            FieldKind::Card { fields } => {
                Some(serde_json::to_value(fields).map_err(serde::ser::Error::custom)?)
            }
            _ => None,
        };

        let raw = RawFieldSpec {
            name: self.name.clone(),
            title: self.title.clone(),
            placeholder: self.placeholder.clone(),
            type_tag: self.kind.type_name().to_string(),
            data,
            required: self.required,
            validator: self.validator.clone(),
            min: self.min.clone(),
            max: self.max.clone(),
            resolution: self.resolution.clone(),
            error: self.error.clone(),
            default: self.default.clone(),
        };
        raw.serialize(serializer)
    }
}

/// An ordered, immutable sequence of root field definitions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    fields: Vec<FieldSpec>,
}

impl Schema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Parse a schema from its JSON wire form
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build a schema from an already-parsed JSON value
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Build the dotted-path index for this schema.
    ///
    /// Built once per schema assignment; change dispatch resolves fields
    /// through it instead of re-walking the tree per keystroke.
    pub fn index(&self) -> PathIndex {
        PathIndex::build(self)
    }

    /// Report structural problems: duplicate names within a level,
    /// uncompilable validator patterns, empty option lists, and invalid
    /// upload targets. An empty result means the schema is well-formed.
    pub fn check(&self) -> Vec<Error> {
        let mut problems = Vec::new();
        check_level(&self.fields, "", &mut problems);
        problems
    }
}

fn check_level(fields: &[FieldSpec], prefix: &str, problems: &mut Vec<Error>) {
    let mut seen = HashSet::new();
    for field in fields {
        let path = join_path(prefix, &field.name);
        if !seen.insert(field.name.as_str()) {
            problems.push(Error::schema(&path, "duplicate field name at this level"));
        }
        if let Some(pattern) = &field.validator {
            if let Err(e) = compile_anchored(pattern) {
                problems.push(Error::schema(&path, format!("invalid validator pattern: {}", e)));
            }
        }
        match &field.kind {
            FieldKind::Card { fields } => check_level(fields, &path, problems),
            FieldKind::File { target } => {
                if let Err(e) = Url::parse(&target.url) {
                    problems.push(Error::schema(&path, format!("invalid upload URL: {}", e)));
                }
                if reqwest::Method::from_bytes(target.method.as_bytes()).is_err() {
                    problems.push(Error::schema(
                        &path,
                        format!("invalid upload method '{}'", target.method),
                    ));
                }
            }
            kind => {
                if let Some(options) = kind.options() {
                    if options.is_empty() {
                        problems.push(Error::schema(&path, "option list is empty"));
                    }
                }
            }
        }
    }
}

/// Join a dotted prefix with a field name
pub(crate) fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

/// Dotted-path index over a schema: path → position chain into the tree.
///
/// Card fields are indexed both as addressable nodes and as prefixes of
/// their children. When sibling levels reuse a name the first definition
/// wins, mirroring the depth-first search it replaces.
#[derive(Debug, Clone)]
pub struct PathIndex {
    entries: HashMap<String, Vec<usize>>,
}

impl PathIndex {
    fn build(schema: &Schema) -> Self {
        let mut entries = HashMap::new();
        index_level(schema.fields(), "", &mut Vec::new(), &mut entries);
        Self { entries }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Number of indexed paths
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the field definition at a dotted path
    pub fn resolve<'a>(&self, schema: &'a Schema, path: &str) -> Option<&'a FieldSpec> {
        let chain = self.entries.get(path)?;
        let mut fields = schema.fields();
        let mut found = None;
        for &pos in chain {
            let field = fields.get(pos)?;
            fields = field.children().unwrap_or(&[]);
            found = Some(field);
        }
        found
    }
}

fn index_level(
    fields: &[FieldSpec],
    prefix: &str,
    chain: &mut Vec<usize>,
    entries: &mut HashMap<String, Vec<usize>>,
) {
    for (pos, field) in fields.iter().enumerate() {
        let path = join_path(prefix, &field.name);
        chain.push(pos);
        entries.entry(path.clone()).or_insert_with(|| chain.clone());
        if let Some(children) = field.children() {
            index_level(children, &path, chain, entries);
        }
        chain.pop();
    }
}
