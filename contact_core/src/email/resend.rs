//! Resend transactional email API transport

use super::message::ContactEmail;
use super::transport::{DeliveryChannel, DeliveryError, DeliveryReceipt, EmailTransport};
use crate::config::EmailConfig;
use crate::error::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const INVALID_KEY_MARKER: &str = "api key is invalid";

#[derive(Debug, Default, Deserialize)]
struct ProviderErrorBody {
    message: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProviderSendBody {
    id: Option<String>,
}

#[derive(Clone)]
pub struct ResendTransport {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl ResendTransport {
    pub fn new(config: &EmailConfig, api_key: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/emails", config.api_base_url.trim_end_matches('/')),
            api_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn classify_error(status: u16, body: ProviderErrorBody) -> DeliveryError {
    let message = body
        .message
        .or(body.name)
        .unwrap_or_else(|| format!("HTTP {}", status));

    if message.to_lowercase().contains(INVALID_KEY_MARKER) {
        DeliveryError::InvalidCredential(message)
    } else {
        DeliveryError::Rejected { status, message }
    }
}

#[async_trait]
impl EmailTransport for ResendTransport {
    async fn send(&self, email: &ContactEmail) -> std::result::Result<DeliveryReceipt, DeliveryError> {
        debug!(endpoint = %self.endpoint, subject = %email.subject, "sending email via provider");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(email)
            .send()
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;

        let status = response.status();

        if status.is_success() {
            // a 2xx without a readable body still means the provider accepted it
            let id = response
                .json::<ProviderSendBody>()
                .await
                .ok()
                .and_then(|body| body.id);
            return Ok(DeliveryReceipt::provider(id));
        }

        let body = response.json::<ProviderErrorBody>().await.map_err(|e| {
            DeliveryError::Transport(format!("unreadable provider error response: {}", e))
        })?;

        Err(classify_error(status.as_u16(), body))
    }

    fn channel(&self) -> DeliveryChannel {
        DeliveryChannel::Provider
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(message: Option<&str>, name: Option<&str>) -> ProviderErrorBody {
        ProviderErrorBody {
            message: message.map(str::to_string),
            name: name.map(str::to_string),
        }
    }

    #[test]
    fn test_invalid_key_is_recognised() {
        let err = classify_error(401, body(Some("API key is invalid"), Some("validation_error")));
        assert_eq!(err, DeliveryError::InvalidCredential("API key is invalid".to_string()));

        let err = classify_error(403, body(Some("The api key is invalid for this domain"), None));
        assert!(matches!(err, DeliveryError::InvalidCredential(_)));
    }

    #[test]
    fn test_other_errors_are_rejections() {
        let err = classify_error(422, body(Some("Invalid `to` field"), None));
        assert_eq!(
            err,
            DeliveryError::Rejected {
                status: 422,
                message: "Invalid `to` field".to_string()
            }
        );

        let err = classify_error(500, body(None, Some("internal_server_error")));
        assert!(matches!(err, DeliveryError::Rejected { status: 500, .. }));

        let err = classify_error(503, ProviderErrorBody::default());
        assert_eq!(
            err,
            DeliveryError::Rejected {
                status: 503,
                message: "HTTP 503".to_string()
            }
        );
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        let config = EmailConfig {
            api_base_url: "http://localhost:9999/".to_string(),
            ..EmailConfig::default()
        };
        let transport = ResendTransport::new(&config, "re_test".to_string()).unwrap();
        assert_eq!(transport.endpoint(), "http://localhost:9999/emails");
        assert_eq!(transport.channel(), DeliveryChannel::Provider);
    }
}
