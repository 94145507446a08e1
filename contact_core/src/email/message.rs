//! Outbound email composed from a contact submission

use crate::config::EmailConfig;
use crate::models::ContactSubmission;
use serde::Serialize;

pub const SUBJECT_PREFIX: &str = "Portfolio Contact: ";

/// Provider-ready message. Serializes to the provider's send body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub text: String,
    pub reply_to: String,
}

impl ContactEmail {
    pub fn compose(submission: &ContactSubmission, config: &EmailConfig) -> Self {
        Self {
            from: config.from.clone(),
            to: vec![config.recipient.clone()],
            subject: format!("{}{}", SUBJECT_PREFIX, submission.subject()),
            text: render_body(submission),
            reply_to: submission.email().to_string(),
        }
    }
}

fn render_body(submission: &ContactSubmission) -> String {
    let mut body = format!(
        "Name: {}\nEmail: {}\n",
        submission.name(),
        submission.email()
    );
    if let Some(phone) = submission.phone() {
        body.push_str(&format!("Phone: {}\n", phone));
    }
    body.push_str(&format!(
        "Subject: {}\n\nMessage:\n{}\n",
        submission.subject(),
        submission.message()
    ));
    body
}
