//! Email address validation.
//!
//! Accepts the same shape the browser form accepted:
//! `^[^\s@]+@[^\s@]+\.[^\s@]+$`, after rejecting blank input with a distinct
//! reason.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::SignupError;

/// An email address as submitted by a visitor.
///
/// New addresses can only be produced by [`validate_email`]. Deserialization
/// is transparent so entries already persisted in the waitlist slot load
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// The address exactly as submitted.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validate raw form input.
///
/// Blank input (after trimming) is [`SignupError::MissingInput`]; anything
/// else that does not match the address shape is
/// [`SignupError::MalformedEmail`]. The shape check runs on the untrimmed
/// input, so surrounding whitespace is malformed rather than silently
/// stripped.
pub fn validate_email(input: &str) -> Result<EmailAddress, SignupError> {
    if input.trim_matches(is_form_whitespace).is_empty() {
        return Err(SignupError::MissingInput);
    }
    if !has_address_shape(input) {
        return Err(SignupError::MalformedEmail);
    }
    Ok(EmailAddress(input.to_owned()))
}

/// Boolean form of [`validate_email`].
#[must_use]
pub fn is_valid_email(input: &str) -> bool {
    validate_email(input).is_ok()
}

/// Whitespace as browsers count it for `\s` and `trim()`: Unicode
/// whitespace plus the byte-order mark.
fn is_form_whitespace(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

fn has_address_shape(input: &str) -> bool {
    if input.chars().any(is_form_whitespace) {
        return false;
    }
    let Some((local, domain)) = input.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // Needs a '.' with at least one character on each side.
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}
