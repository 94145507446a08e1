//! Delivery channels

use super::message::ContactEmail;
use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryChannel {
    Provider,
    Log,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub channel: DeliveryChannel,
    /// Message id assigned by the provider, if it returned one.
    pub id: Option<String>,
}

impl DeliveryReceipt {
    pub fn provider(id: Option<String>) -> Self {
        Self {
            channel: DeliveryChannel::Provider,
            id,
        }
    }

    pub fn logged() -> Self {
        Self {
            channel: DeliveryChannel::Log,
            id: None,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    /// The provider refused the configured credential.
    #[error("provider rejected the API key: {0}")]
    InvalidCredential(String),

    #[error("provider error (status {status}): {message}")]
    Rejected { status: u16, message: String },

    /// The call never produced a usable provider answer.
    #[error("transport failure: {0}")]
    Transport(String),
}

#[async_trait]
pub trait EmailTransport: Send + Sync {
    async fn send(&self, email: &ContactEmail) -> Result<DeliveryReceipt, DeliveryError>;

    fn channel(&self) -> DeliveryChannel;
}

/// Degraded channel: records the message in the service log instead of mailing it.
#[derive(Debug, Clone, Default)]
pub struct LogTransport;

#[async_trait]
impl EmailTransport for LogTransport {
    async fn send(&self, email: &ContactEmail) -> Result<DeliveryReceipt, DeliveryError> {
        info!(
            to = ?email.to,
            subject = %email.subject,
            from = %email.reply_to,
            message = %email.text,
            received_at = %chrono::Utc::now().to_rfc3339(),
            "contact submission logged"
        );
        Ok(DeliveryReceipt::logged())
    }

    fn channel(&self) -> DeliveryChannel {
        DeliveryChannel::Log
    }
}
