use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ContactError;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Absent and empty keys are distinct failures; whitespace is not trimmed.
pub fn validate_api_key(api_key: Option<&str>) -> Result<&str, ContactError> {
    match api_key {
        None => Err(ContactError::MissingApiKey),
        Some("") => Err(ContactError::EmptyApiKey),
        Some(key) => Ok(key),
    }
}

/// Returns the trimmed address when it has a `local@domain.tld` shape.
pub fn validate_email(email: Option<&str>) -> Result<&str, ContactError> {
    let email = match email {
        Some(email) if !email.is_empty() => email,
        _ => return Err(ContactError::MissingEmail),
    };
    let trimmed = email.trim();
    if EMAIL_RE.is_match(trimmed) {
        Ok(trimmed)
    } else {
        Err(ContactError::InvalidEmail)
    }
}
