//! Contact form models

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MSG_CHECK_FORM: &str = "Please check the form for errors.";
pub const MSG_SEND_FAILED: &str = "There was an error sending your message. Please try again later.";
pub const MSG_RECEIVED: &str = "Your message has been received! I'll get back to you soon.";

/// Raw contact form as it arrives from the client. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    pub phone: Option<String>,
}

/// A contact form that passed validation. Only the validator constructs these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactSubmission {
    name: String,
    email: String,
    subject: String,
    message: String,
    phone: Option<String>,
}

impl ContactSubmission {
    pub(crate) fn new(
        name: String,
        email: String,
        subject: String,
        message: String,
        phone: Option<String>,
    ) -> Self {
        Self {
            name,
            email,
            subject,
            message,
            phone,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }
}

/// Result of the "submit contact form" operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub errors: Option<BTreeMap<String, String>>,
}

impl ContactResponse {
    pub fn received() -> Self {
        Self {
            success: true,
            message: MSG_RECEIVED.to_string(),
            errors: None,
        }
    }

    pub fn invalid(errors: BTreeMap<String, String>) -> Self {
        Self {
            success: false,
            message: MSG_CHECK_FORM.to_string(),
            errors: Some(errors),
        }
    }

    pub fn send_failed() -> Self {
        Self {
            success: false,
            message: MSG_SEND_FAILED.to_string(),
            errors: None,
        }
    }

    pub fn malformed() -> Self {
        Self {
            success: false,
            message: MSG_CHECK_FORM.to_string(),
            errors: None,
        }
    }
}
