//! Core library for the portfolio contact service: form validation, email
//! delivery and the HTTP surface that ties them together.

pub mod config;
pub mod email;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod validation;

pub use crate::config::{AppConfig, EmailConfig};
pub use email::{DeliveryOutcome, EmailDispatcher, EmailTransport};
pub use error::{AppError, Result};
pub use handlers::routes::create_routes;
pub use middleware::rate_limit::RateLimiter;
pub use models::{ContactForm, ContactResponse, ContactSubmission};
pub use services::ContactService;
pub use validation::{validate_contact_form, ValidationResult};

use axum::Router;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    pub app_name: String,
    pub version: String,
    pub contact_service: ContactService,
    pub rate_limiter: RateLimiter,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let dispatcher = EmailDispatcher::from_config(config.email.clone())?;

        Ok(Self {
            app_name: "Portfolio Contact Service".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            contact_service: ContactService::new(dispatcher),
            rate_limiter: RateLimiter::new(&config.rate_limit),
        })
    }

    pub fn with_dispatcher(mut self, dispatcher: EmailDispatcher) -> Self {
        self.contact_service = ContactService::new(dispatcher);
        self
    }

    pub fn with_rate_limiter(mut self, rate_limiter: RateLimiter) -> Self {
        self.rate_limiter = rate_limiter;
        self
    }
}

pub fn create_app(state: AppState) -> Router {
    create_app_with_config(state, &AppConfig::default())
}

pub fn create_app_with_config(state: AppState, config: &AppConfig) -> Router {
    create_routes(&state)
        .layer(middleware::cors::cors_layer_from_config(&config.cors))
        .layer(middleware::logging::logging_layer())
        .layer(middleware::panic::catch_panic_layer())
        .with_state(state)
}

pub async fn run_server(app: Router, addr: SocketAddr) -> Result<()> {
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    let app = app.into_make_service_with_connect_info::<SocketAddr>();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
