//! End-to-end walk of the complex sample schema: initialization, editing,
//! rejected submission, repair, and a successful submission.

use schemaform_core::{
    apply_event, render_form, samples, Control, FieldEvent, FieldValue, FormState, SubmitOutcome,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[tokio::test]
async fn complex_form_lifecycle() {
    let schema = samples::complex();
    assert!(schema.check().is_empty());

    let mut form = FormState::new(schema);

    // Defaults: buttons field starts at its declared default, card children
    // start empty.
    assert_eq!(
        form.value_at("contact_method"),
        Some(&FieldValue::Text("email".to_string()))
    );
    assert_eq!(
        form.value_at("education.institution"),
        Some(&FieldValue::Text(String::new()))
    );

    // First submission attempt: required fields are still empty, so the
    // handler must not run and dotted-path errors must appear.
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = calls.clone();
    let outcome = form
        .submit(|_| {
            seen.fetch_add(1, Ordering::SeqCst);
            async { Ok(()) }
        })
        .await;
    assert_eq!(outcome, SubmitOutcome::Rejected);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(
        form.error_at("education.institution"),
        Some("Institution name is required.")
    );
    assert_eq!(form.error_at("fullName"), Some("Full name must be at least 3 characters."));

    // The rendered tree reflects the errors beneath the card's children.
    let rendered = render_form(form.schema(), form.data(), form.errors());
    let education = rendered
        .iter()
        .find(|f| f.name == "education")
        .expect("education card rendered");
    match &education.control {
        Control::Group { children } => {
            let institution = children.iter().find(|c| c.name == "institution").unwrap();
            assert!(institution.is_invalid());
        }
        other => panic!("expected group, got {:?}", other),
    }

    // Repair the form field by field, the way a UI would: events first.
    form.set_field(
        "fullName",
        apply_event(None, FieldEvent::Edit("Grace Hopper".to_string())),
    );
    form.set_value("education.institution", "Vassar College".into());
    form.set_value(
        "education.degree",
        apply_event(None, FieldEvent::Choose("phd".to_string())),
    );
    form.set_value("education.start_date", "2001-09-01".into());

    // Out-of-range date shows up at its dotted path, then clears.
    form.set_value("education.end_date", "1999-01-01".into());
    assert_eq!(form.error_at("education.end_date"), Some("Enter valid end date."));
    form.set_value("education.end_date", "2005-06-30".into());
    assert!(form.errors().is_empty());

    // Second attempt succeeds and hands the handler the full tree.
    let seen = calls.clone();
    let outcome = form
        .submit(move |data| {
            seen.fetch_add(1, Ordering::SeqCst);
            async move {
                let nested = data["education"].as_nested().expect("nested education data");
                assert_eq!(nested["degree"], FieldValue::Text("phd".to_string()));
                Ok(())
            }
        })
        .await;
    assert_eq!(outcome, SubmitOutcome::Submitted);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(!form.is_submitting());
}

#[tokio::test]
async fn select_sample_multiselect_toggling() {
    let mut form = FormState::new(samples::select());
    assert_eq!(
        form.value_at("tech_stack"),
        Some(&FieldValue::Many(vec!["react".to_string()]))
    );

    // Toggle vue on, then react off.
    let next = apply_event(form.value_at("tech_stack"), FieldEvent::Toggle("vue".to_string()));
    form.set_field("tech_stack", next);
    let next = apply_event(form.value_at("tech_stack"), FieldEvent::Toggle("react".to_string()));
    form.set_field("tech_stack", next);
    assert_eq!(
        form.value_at("tech_stack"),
        Some(&FieldValue::Many(vec!["vue".to_string()]))
    );

    let outcome = form.submit(|_| async { Ok(()) }).await;
    assert_eq!(outcome, SubmitOutcome::Submitted);
}
