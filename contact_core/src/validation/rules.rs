//! Field rules for contact form validation

use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;
use validator::ValidationError;

pub const MESSAGE_MIN_CHARS: usize = 10;

pub const CODE_REQUIRED: &str = "required";
pub const CODE_INVALID_FORMAT: &str = "invalid_format";
pub const CODE_TOO_SHORT: &str = "too_short";

lazy_static! {
    // local@domain.tld with no whitespace in any segment
    static ref EMAIL_SHAPE_REGEX: Regex = Regex::new(r"\S+@\S+\.\S+").unwrap();
}

fn rule_error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

pub fn validate_required(value: &str, message: &'static str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(rule_error(CODE_REQUIRED, message));
    }
    Ok(())
}

pub fn validate_email_shape(email: &str) -> Result<(), ValidationError> {
    if !EMAIL_SHAPE_REGEX.is_match(email) {
        return Err(rule_error(CODE_INVALID_FORMAT, "Invalid email address"));
    }
    Ok(())
}

pub fn validate_min_chars(
    value: &str,
    min: usize,
    message: &'static str,
) -> Result<(), ValidationError> {
    if value.chars().count() < min {
        return Err(rule_error(CODE_TOO_SHORT, message));
    }
    Ok(())
}

/// Human readable text for a rule failure, falling back to the code.
pub fn error_message(error: &ValidationError) -> String {
    error
        .message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| error.code.to_string())
}
