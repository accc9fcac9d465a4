//! Field-level rules shared by person and country requests.

use crate::domain::error::DomainError;

pub const PERSON_NAME_MAX_CHARS: usize = 40;
pub const EMAIL_MAX_CHARS: usize = 40;
pub const ADDRESS_MAX_CHARS: usize = 200;

/// Returns the value when it is present and contains something other than whitespace.
pub fn required_text<'a>(value: Option<&'a str>, field: &'static str) -> Result<&'a str, DomainError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(DomainError::validation(field, "can't be blank")),
    }
}

pub fn ensure_max_chars(
    value: Option<&str>,
    max: usize,
    field: &'static str,
) -> Result<(), DomainError> {
    match value {
        Some(text) if text.chars().count() > max => Err(DomainError::validation(
            field,
            format!("must be at most {max} characters"),
        )),
        _ => Ok(()),
    }
}

/// Accepts `local@domain.tld` shapes: exactly one `@`, a non-empty local part and a
/// dotted domain without empty labels or whitespace.
pub fn ensure_email(value: &str, field: &'static str) -> Result<(), DomainError> {
    let invalid = || DomainError::validation(field, "should be a valid email");
    let trimmed = value.trim();
    if trimmed.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = trimmed.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    if !domain.contains('.') || domain.split('.').any(str::is_empty) {
        return Err(invalid());
    }
    Ok(())
}

/// Trims the value and maps blank input to `None`.
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value.and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}
