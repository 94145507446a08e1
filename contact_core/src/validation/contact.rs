//! Contact form validator

use super::{rules::*, Validatable, ValidationResult};
use crate::models::{ContactForm, ContactSubmission};

fn normalized(value: &Option<String>) -> String {
    value.as_deref().map(str::trim).unwrap_or_default().to_string()
}

/// Checks every field independently and either accepts the form or reports one
/// message per failing field. Pure: the same input always yields the same output.
pub fn validate_contact_form(form: &ContactForm) -> Result<ContactSubmission, ValidationResult> {
    let name = normalized(&form.name);
    let email = normalized(&form.email);
    let subject = normalized(&form.subject);
    let message = normalized(&form.message);
    let phone = Some(normalized(&form.phone)).filter(|p| !p.is_empty());

    let mut result = ValidationResult::success();

    result.check("name", validate_required(&name, "Name is required"));

    if result.check("email", validate_required(&email, "Email is required")) {
        result.check("email", validate_email_shape(&email));
    }

    result.check("subject", validate_required(&subject, "Subject is required"));

    // length counts the message as typed, surrounding whitespace included
    if result.check("message", validate_required(&message, "Message is required")) {
        result.check(
            "message",
            validate_min_chars(
                form.message.as_deref().unwrap_or_default(),
                MESSAGE_MIN_CHARS,
                "Message must be at least 10 characters",
            ),
        );
    }

    if !result.is_valid {
        return Err(result);
    }

    Ok(ContactSubmission::new(name, email, subject, message, phone))
}

impl Validatable for ContactForm {
    type Output = ContactSubmission;

    fn validate_comprehensive(&self) -> Result<ContactSubmission, ValidationResult> {
        validate_contact_form(self)
    }
}
