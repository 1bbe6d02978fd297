use gpui::SharedString;

use crate::form::ValidationError;

use super::{ContactError, MESSAGE_MIN_LEN, NAME_MIN_LEN};

/// Whitespace stripped before measuring: Unicode `White_Space` plus the byte
/// order mark, without NEL (U+0085).
fn is_trimmed(c: char) -> bool {
    c == '\u{FEFF}' || (c != '\u{85}' && c.is_whitespace())
}

fn trim_blank(value: &str) -> &str {
    value.trim_matches(is_trimmed)
}

/// Lengths are counted in UTF-16 code units of the trimmed value, so an astral
/// character counts twice. The stored value itself is never trimmed.
fn trimmed_len(value: &str) -> usize {
    trim_blank(value).encode_utf16().count()
}

pub fn validate_name(value: &str) -> Result<(), ContactError> {
    match trimmed_len(value) {
        0 => Err(ContactError::NameRequired),
        len if len < NAME_MIN_LEN => Err(ContactError::NameTooShort),
        _ => Ok(()),
    }
}

/// Presence of `@` is the only format rule.
pub fn validate_email(value: &str) -> Result<(), ContactError> {
    if trim_blank(value).is_empty() {
        return Err(ContactError::EmailRequired);
    }
    if !value.contains('@') {
        return Err(ContactError::EmailMissingAt);
    }
    Ok(())
}

pub fn validate_message(value: &str) -> Result<(), ContactError> {
    match trimmed_len(value) {
        0 => Err(ContactError::MessageRequired),
        len if len < MESSAGE_MIN_LEN => Err(ContactError::MessageTooShort),
        _ => Ok(()),
    }
}

/// Empty text for a passing result, the error message otherwise.
pub fn error_text(result: &Result<(), ContactError>) -> SharedString {
    match result {
        Ok(()) => SharedString::default(),
        Err(error) => error.message(),
    }
}
