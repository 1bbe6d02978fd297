//! The contact form: three text fields, their validators and the controller
//! instantiation that ties them together.

use std::fmt::{Display, Formatter};

use gpui::SharedString;

use crate::form::{
    FieldKey, FieldLens, FormController, FormModel, FormOptions, FormResult, ValidationError,
};

mod validators;


pub use validators::{error_text, validate_email, validate_message, validate_name};

pub const NAME_MIN_LEN: usize = 2;
pub const MESSAGE_MIN_LEN: usize = 10;

#[derive(Clone, Debug, Default, Eq, PartialEq, FormModel)]
pub struct ContactFormData {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ContactError {
    NameRequired,
    NameTooShort,
    EmailRequired,
    EmailMissingAt,
    MessageRequired,
    MessageTooShort,
}

impl ContactError {
    pub const fn as_str(self) -> &'static str {
        match self {
            ContactError::NameRequired => "Name is required",
            ContactError::NameTooShort => "Name must be at least 2 characters",
            ContactError::EmailRequired => "Email is required",
            ContactError::EmailMissingAt => "Email must include @",
            ContactError::MessageRequired => "Message is required",
            ContactError::MessageTooShort => "Message must be at least 10 characters",
        }
    }
}

impl Display for ContactError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ValidationError for ContactError {
    fn message(&self) -> SharedString {
        SharedString::from(self.as_str())
    }
}

pub type ContactForm = FormController<ContactFormData, ContactError>;

/// Builds a contact form controller with the three field validators
/// installed.
pub fn contact_form(options: FormOptions) -> FormResult<ContactForm> {
    let form = ContactForm::new(ContactFormData::default(), options);
    let fields = ContactFormData::fields();
    form.register_field_validator(fields.name(), |_: &ContactFormData, value: &String| {
        validate_name(value)
    })?;
    form.register_field_validator(fields.email(), |_: &ContactFormData, value: &String| {
        validate_email(value)
    })?;
    form.register_field_validator(fields.message(), |_: &ContactFormData, value: &String| {
        validate_message(value)
    })?;
    Ok(form)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl ContactField {
    pub const ALL: [ContactField; 3] = [
        ContactField::Name,
        ContactField::Email,
        ContactField::Message,
    ];

    pub fn key(self) -> FieldKey {
        let fields = ContactFormData::fields();
        match self {
            ContactField::Name => fields.name().key(),
            ContactField::Email => fields.email().key(),
            ContactField::Message => fields.message().key(),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ContactField::Name => "Name",
            ContactField::Email => "Email",
            ContactField::Message => "Message",
        }
    }

    pub fn value(self, model: &ContactFormData) -> &str {
        match self {
            ContactField::Name => &model.name,
            ContactField::Email => &model.email,
            ContactField::Message => &model.message,
        }
    }

    pub fn validate(self, value: &str) -> Result<(), ContactError> {
        match self {
            ContactField::Name => validate_name(value),
            ContactField::Email => validate_email(value),
            ContactField::Message => validate_message(value),
        }
    }

    pub fn change(self, form: &ContactForm, value: String) -> FormResult<()> {
        let fields = ContactFormData::fields();
        match self {
            ContactField::Name => form.change(fields.name(), value),
            ContactField::Email => form.change(fields.email(), value),
            ContactField::Message => form.change(fields.message(), value),
        }
    }

    pub fn blur(self, form: &ContactForm) -> FormResult<()> {
        let fields = ContactFormData::fields();
        match self {
            ContactField::Name => form.blur(fields.name()),
            ContactField::Email => form.blur(fields.email()),
            ContactField::Message => form.blur(fields.message()),
        }
    }
}
