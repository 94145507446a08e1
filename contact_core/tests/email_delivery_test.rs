//! Delivery tests against a mocked email provider.

use contact_core::{
    email::{DegradedReason, DeliveryError, DeliveryOutcome, EmailDispatcher},
    validate_contact_form, ContactForm, ContactSubmission, EmailConfig,
};
use mockito::{Matcher, Server};
use serde_json::json;

const API_KEY: &str = "re_test_key";

fn submission() -> ContactSubmission {
    validate_contact_form(&ContactForm {
        name: Some("Katherine Johnson".to_string()),
        email: Some("katherine@example.com".to_string()),
        subject: Some("Trajectory work".to_string()),
        message: Some("I enjoyed your projects section a lot.".to_string()),
        phone: Some("555-0199".to_string()),
    })
    .unwrap()
}

fn config(base_url: String, api_key: Option<&str>) -> EmailConfig {
    EmailConfig {
        recipient: "owner@example.com".to_string(),
        api_key: api_key.map(str::to_string),
        api_base_url: base_url,
        request_timeout_seconds: 5,
        ..EmailConfig::default()
    }
}

#[tokio::test]
async fn test_no_credential_makes_no_network_call() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let dispatcher = EmailDispatcher::from_config(config(server.url(), None)).unwrap();
    let outcome = dispatcher.dispatch(&submission()).await;

    assert!(outcome.is_delivered());
    assert_eq!(
        outcome,
        DeliveryOutcome::Degraded { reason: DegradedReason::NoCredential }
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn test_provider_success_sends_expected_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/emails")
        .match_header("authorization", "Bearer re_test_key")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "from": "Nengi Portfolio <onboarding@resend.dev>",
            "to": ["owner@example.com"],
            "subject": "Portfolio Contact: Trajectory work",
            "reply_to": "katherine@example.com"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":"49a3999c-0ce1-4ea6-ab68-afcd6dc2e794"}"#)
        .expect(1)
        .create_async()
        .await;

    let dispatcher = EmailDispatcher::from_config(config(server.url(), Some(API_KEY))).unwrap();
    let outcome = dispatcher.dispatch(&submission()).await;

    assert_eq!(
        outcome,
        DeliveryOutcome::Sent {
            id: Some("49a3999c-0ce1-4ea6-ab68-afcd6dc2e794".to_string())
        }
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn test_body_text_includes_every_field() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/emails")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex("Name: Katherine Johnson".to_string()),
            Matcher::Regex("Phone: 555-0199".to_string()),
            Matcher::Regex("I enjoyed your projects section a lot.".to_string()),
        ]))
        .with_status(200)
        .with_body(r#"{"id":"abc"}"#)
        .create_async()
        .await;

    let dispatcher = EmailDispatcher::from_config(config(server.url(), Some(API_KEY))).unwrap();
    assert!(dispatcher.dispatch(&submission()).await.is_delivered());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_invalid_api_key_is_masked_as_success() {
    // Deliberate: a visitor must not see the site's misconfiguration. The
    // dispatcher logs the failure and reports the message as delivered.
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/emails")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"statusCode":401,"message":"API key is invalid","name":"validation_error"}"#)
        .expect(1)
        .create_async()
        .await;

    let dispatcher = EmailDispatcher::from_config(config(server.url(), Some("re_wrong"))).unwrap();
    let outcome = dispatcher.dispatch(&submission()).await;

    assert!(outcome.is_delivered());
    assert_eq!(
        outcome,
        DeliveryOutcome::Degraded { reason: DegradedReason::InvalidCredential }
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn test_generic_provider_error_fails() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/emails")
        .with_status(422)
        .with_header("content-type", "application/json")
        .with_body(r#"{"statusCode":422,"message":"Invalid `to` field.","name":"validation_error"}"#)
        .create_async()
        .await;

    let dispatcher = EmailDispatcher::from_config(config(server.url(), Some(API_KEY))).unwrap();
    let outcome = dispatcher.dispatch(&submission()).await;

    assert!(!outcome.is_delivered());
    assert_eq!(
        outcome,
        DeliveryOutcome::Failed {
            error: DeliveryError::Rejected {
                status: 422,
                message: "Invalid `to` field.".to_string()
            }
        }
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unreadable_error_body_is_masked() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/emails")
        .with_status(502)
        .with_header("content-type", "text/html")
        .with_body("<html>Bad Gateway</html>")
        .create_async()
        .await;

    let dispatcher = EmailDispatcher::from_config(config(server.url(), Some(API_KEY))).unwrap();
    let outcome = dispatcher.dispatch(&submission()).await;

    assert_eq!(
        outcome,
        DeliveryOutcome::Degraded { reason: DegradedReason::TransportFailure }
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn test_network_failure_is_masked_as_success() {
    // Nothing listens on port 1, so the request cannot complete.
    let dispatcher =
        EmailDispatcher::from_config(config("http://127.0.0.1:1".to_string(), Some(API_KEY))).unwrap();
    let outcome = dispatcher.dispatch(&submission()).await;

    assert!(outcome.is_delivered());
    assert_eq!(
        outcome,
        DeliveryOutcome::Degraded { reason: DegradedReason::TransportFailure }
    );
}
