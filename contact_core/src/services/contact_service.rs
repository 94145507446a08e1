use crate::{
    email::EmailDispatcher,
    models::{ContactForm, ContactResponse},
    validation::validate_contact_form,
};
use tracing::{info, warn};

#[derive(Clone)]
pub struct ContactService {
    dispatcher: EmailDispatcher,
}

impl ContactService {
    pub fn new(dispatcher: EmailDispatcher) -> Self {
        Self { dispatcher }
    }

    pub fn dispatcher(&self) -> &EmailDispatcher {
        &self.dispatcher
    }

    /// Validates the form and, only when every field passes, hands it to the dispatcher.
    pub async fn submit(&self, form: ContactForm) -> ContactResponse {
        let submission = match validate_contact_form(&form) {
            Ok(submission) => submission,
            Err(result) => {
                warn!(fields = ?result.error_codes, "contact form rejected");
                return ContactResponse::invalid(result.errors);
            }
        };

        info!(
            name = %submission.name(),
            email = %submission.email(),
            subject = %submission.subject(),
            message_length = submission.message().chars().count(),
            "form submission received"
        );

        let outcome = self.dispatcher.dispatch(&submission).await;

        if !outcome.is_delivered() {
            return ContactResponse::send_failed();
        }

        ContactResponse::received()
    }
}
