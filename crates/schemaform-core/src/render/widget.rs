//! The headless widget view-model
//!
//! Rendering a field produces a [`RenderedField`]: the chrome every control
//! shares (label, required marker, error string) plus a [`Control`] variant
//! describing the interactive part. The model is serializable so embedders
//! and the CLI preview can ship it across any boundary.

use crate::schema::{OptionItem, UploadTarget};
use serde::Serialize;
use serde_json::Value;

/// One rendered field: shared chrome plus its control
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedField {
    pub name: String,
    pub label: String,
    pub required: bool,
    /// Validation message surfaced beneath the control, when non-empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub control: Control,
}

impl RenderedField {
    /// Whether the control should visually flag itself as errored
    pub fn is_invalid(&self) -> bool {
        self.error.as_deref().is_some_and(|e| !e.is_empty())
    }
}

/// Closed enumeration of presentation widgets, keyed on field type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "widget", rename_all = "snake_case")]
pub enum Control {
    /// Single-line editable control for the scalar text-like types
    Input {
        input_type: InputType,
        #[serde(skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
        value: String,
        /// Constraints passed through for number/date inputs
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        step: Option<String>,
    },
    /// Multi-line editable control
    TextArea {
        #[serde(skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
        value: String,
    },
    /// Single choice from a dropdown option list
    Select {
        options: Vec<OptionItem>,
        #[serde(skip_serializing_if = "Option::is_none")]
        selected: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
    },
    /// Multi choice: a checkbox list plus removable chips for the current
    /// selections
    CheckList {
        options: Vec<OptionItem>,
        /// Selected ids in toggle order
        selected: Vec<String>,
        /// Selections resolved to their option items, for chip display
        chips: Vec<OptionItem>,
    },
    /// Single choice rendered as mutually exclusive toggle buttons
    ButtonGroup {
        options: Vec<OptionItem>,
        #[serde(skip_serializing_if = "Option::is_none")]
        selected: Option<String>,
    },
    /// Free-text input with an attached suggestion list
    Typeahead {
        suggestions: Vec<OptionItem>,
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
    },
    /// File picker backed by the upload sub-component
    FileDrop {
        target: UploadTarget,
        /// The stored upload result, when a file has been uploaded
        #[serde(skip_serializing_if = "Option::is_none")]
        uploaded: Option<Value>,
    },
    /// A card: titled group of nested rendered fields
    Group { children: Vec<RenderedField> },
}

/// Input type tag for the scalar text-like controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Text,
    Email,
    Tel,
    Number,
    Date,
    Datetime,
}
