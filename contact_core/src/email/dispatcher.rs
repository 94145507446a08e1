//! Delivery state machine for contact submissions

use super::message::ContactEmail;
use super::resend::ResendTransport;
use super::transport::{DeliveryChannel, DeliveryError, EmailTransport, LogTransport};
use crate::config::EmailConfig;
use crate::error::Result;
use crate::models::ContactSubmission;
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegradedReason {
    NoCredential,
    InvalidCredential,
    TransportFailure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The provider accepted the message.
    Sent { id: Option<String> },
    /// The message only reached the log. Reported to the visitor as delivered.
    Degraded { reason: DegradedReason },
    Failed { error: DeliveryError },
}

impl DeliveryOutcome {
    pub fn is_delivered(&self) -> bool {
        !matches!(self, DeliveryOutcome::Failed { .. })
    }
}

/// Sends accepted submissions to the site owner.
///
/// Each call is one independent attempt with no retry. Without a credential the
/// dispatcher never leaves the process. With one, a refused key or a call that
/// cannot complete falls back to the log and still counts as delivered, while any
/// other provider error is reported as a failure.
#[derive(Clone)]
pub struct EmailDispatcher {
    config: EmailConfig,
    primary: Arc<dyn EmailTransport>,
    fallback: Arc<dyn EmailTransport>,
}

impl EmailDispatcher {
    pub fn from_config(config: EmailConfig) -> Result<Self> {
        let primary: Arc<dyn EmailTransport> = match &config.api_key {
            Some(api_key) => Arc::new(ResendTransport::new(&config, api_key.clone())?),
            None => Arc::new(LogTransport),
        };
        Ok(Self::with_transport(config, primary))
    }

    pub fn with_transport(config: EmailConfig, primary: Arc<dyn EmailTransport>) -> Self {
        Self {
            config,
            primary,
            fallback: Arc::new(LogTransport),
        }
    }

    pub fn with_fallback(mut self, fallback: Arc<dyn EmailTransport>) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn mode(&self) -> DeliveryChannel {
        self.primary.channel()
    }

    pub fn recipient(&self) -> &str {
        &self.config.recipient
    }

    pub async fn dispatch(&self, submission: &ContactSubmission) -> DeliveryOutcome {
        let email = ContactEmail::compose(submission, &self.config);

        info!(to = %self.config.recipient, channel = ?self.primary.channel(), "preparing to send email");

        match self.primary.send(&email).await {
            Ok(receipt) if receipt.channel == DeliveryChannel::Provider => {
                info!(id = ?receipt.id, "email sent via provider");
                DeliveryOutcome::Sent { id: receipt.id }
            }
            Ok(_) => {
                info!("no provider credential configured, submission delivered to log");
                DeliveryOutcome::Degraded {
                    reason: DegradedReason::NoCredential,
                }
            }
            Err(DeliveryError::InvalidCredential(message)) => {
                error!(
                    provider_message = %message,
                    "email provider rejected the API key - contact mail is NOT being delivered, check the credential"
                );
                self.degrade(&email, DegradedReason::InvalidCredential).await
            }
            Err(DeliveryError::Transport(detail)) => {
                error!(
                    error = %detail,
                    "email provider call failed - contact mail is NOT being delivered"
                );
                self.degrade(&email, DegradedReason::TransportFailure).await
            }
            Err(err @ DeliveryError::Rejected { .. }) => {
                error!(error = %err, "email provider refused the message");
                DeliveryOutcome::Failed { error: err }
            }
        }
    }

    async fn degrade(&self, email: &ContactEmail, reason: DegradedReason) -> DeliveryOutcome {
        warn!(?reason, "falling back to log delivery");
        match self.fallback.send(email).await {
            Ok(_) => DeliveryOutcome::Degraded { reason },
            Err(err) => {
                error!(error = %err, "fallback delivery failed");
                DeliveryOutcome::Failed { error: err }
            }
        }
    }
}
