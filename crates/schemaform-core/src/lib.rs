//! schemaform-core - Schema-driven form engine
//!
//! Renders interactive forms from a declarative schema and validates user
//! input against per-field rules, including nested sub-forms (cards) and
//! asynchronous file uploads. The engine is headless: rendering produces a
//! typed widget view-model for an embedding UI to draw, and all mutation
//! flows through a single form orchestrator.
//!
//! # Main Components
//!
//! - **Schema**: field definitions with a tagged payload per field type
//! - **Validator**: per-field rule checks and whole-tree validation into a
//!   flat dotted-path error map
//! - **Form Orchestrator**: owns the value tree and error map, dispatches
//!   field changes, and gates submission on full validation
//! - **Renderer**: stateless field-to-widget mapping plus interaction events
//! - **Upload**: one-shot multipart file upload with a re-enterable state
//!   machine
//!
//! # Example
//!
//! ```
//! use schemaform_core::{samples, FormState, SubmitOutcome};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut form = FormState::new(samples::basic());
//! form.set_field("name", "Ada Lovelace".into());
//! form.set_field("email", "ada@example.com".into());
//!
//! let outcome = form.submit(|data| async move {
//!     println!("submitting {}", serde_json::to_string(&data)?);
//!     Ok(())
//! }).await;
//! assert_eq!(outcome, SubmitOutcome::Submitted);
//! # }
//! ```

pub mod error;
pub mod form;
pub mod render;
pub mod samples;
pub mod schema;
pub mod upload;
pub mod validation;
pub mod value;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use form::{FormState, SubmitOutcome};
pub use render::{apply_event, render_field, render_form, Control, FieldEvent, InputType, RenderedField};
pub use schema::{DefaultValue, FieldKind, FieldSpec, OptionItem, PathIndex, Schema, UploadTarget};
pub use upload::{FileUploader, UploadPhase, UploadTicket};
pub use validation::{validate_field, validate_form, ErrorMap};
pub use value::{data_from_json, defaults_for, FieldValue, FormData};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
