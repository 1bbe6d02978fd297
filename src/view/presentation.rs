use gpui::SharedString;

use crate::contact::{ContactError, ContactField, ContactForm, ContactFormData};
use crate::form::{FieldKey, FormResult, FormSnapshot, ValidationError};

pub const SUBMIT_LABEL: &str = "Submit";
pub const SENDING_LABEL: &str = "Sending...";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputKind {
    Text,
    Email,
    TextArea,
}

impl InputKind {
    pub fn for_field(field: ContactField) -> Self {
        match field {
            ContactField::Name => InputKind::Text,
            ContactField::Email => InputKind::Email,
            ContactField::Message => InputKind::TextArea,
        }
    }

    pub fn is_multiline(self) -> bool {
        self == InputKind::TextArea
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldPresentation {
    pub field: ContactField,
    pub id: FieldKey,
    pub label: &'static str,
    pub kind: InputKind,
    pub value: SharedString,
    pub disabled: bool,
    /// Present only when the field is touched and failing.
    pub error: Option<SharedString>,
}

impl FieldPresentation {
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SubmitButtonPresentation {
    pub label: &'static str,
    pub disabled: bool,
}

/// Everything the contact form renders, derived from one snapshot.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContactFormPresentation {
    pub success_message: Option<SharedString>,
    pub fields: Vec<FieldPresentation>,
    pub submit: SubmitButtonPresentation,
}

impl ContactFormPresentation {
    pub fn capture(form: &ContactForm) -> FormResult<Self> {
        let snapshot = form.snapshot()?;
        let success_message = form.success_message()?;
        Ok(Self::from_snapshot(&snapshot, success_message))
    }

    pub fn from_snapshot(
        snapshot: &FormSnapshot<ContactFormData, ContactError>,
        success_message: Option<SharedString>,
    ) -> Self {
        let submitting = snapshot.is_submitting();
        let fields = ContactField::ALL
            .into_iter()
            .map(|field| {
                let error = snapshot
                    .meta(field.key())
                    .and_then(|meta| meta.visible_error())
                    .map(ValidationError::message);
                FieldPresentation {
                    field,
                    id: field.key(),
                    label: field.label(),
                    kind: InputKind::for_field(field),
                    value: SharedString::from(field.value(&snapshot.model).to_string()),
                    disabled: submitting,
                    error,
                }
            })
            .collect();

        Self {
            success_message,
            fields,
            submit: SubmitButtonPresentation {
                label: if submitting { SENDING_LABEL } else { SUBMIT_LABEL },
                disabled: !snapshot.can_submit(),
            },
        }
    }

    pub fn field(&self, field: ContactField) -> Option<&FieldPresentation> {
        self.fields.iter().find(|entry| entry.field == field)
    }
}
