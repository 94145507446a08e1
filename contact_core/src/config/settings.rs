use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::validation::validate_email_shape;

pub const DEFAULT_RECIPIENT: &str = "ikolinengi1@gmail.com";
pub const DEFAULT_SENDER: &str = "Nengi Portfolio <onboarding@resend.dev>";
pub const DEFAULT_PROVIDER_URL: &str = "https://api.resend.com";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub email: EmailConfig,
    pub cors: CorsConfig,
    pub rate_limit: RateLimitConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Delivery settings handed to the email dispatcher at construction time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    pub recipient: String,
    /// Provider credential. Absent means messages are only logged.
    pub api_key: Option<String>,
    pub api_base_url: String,
    pub from: String,
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub max_age_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub enable: bool,
    pub max_requests: usize,
    pub window_seconds: u64,
    /// Key clients on the proxy-appended `X-Forwarded-For` entry. Only enable
    /// when the service sits behind a reverse proxy.
    pub trust_forwarded_for: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            recipient: DEFAULT_RECIPIENT.to_string(),
            api_key: None,
            api_base_url: DEFAULT_PROVIDER_URL.to_string(),
            from: DEFAULT_SENDER.to_string(),
            request_timeout_seconds: 30,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
            max_age_seconds: 3600,
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enable: true,
            max_requests: 5,
            window_seconds: 60,
            trust_forwarded_for: false,
        }
    }
}

impl EmailConfig {
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Applies the plain `EMAIL_TO` / `RESEND_API_KEY` variables. Empty values are
    /// treated as unset, and a blank key never counts as a credential.
    pub fn apply_overrides(&mut self, recipient: Option<String>, api_key: Option<String>) {
        if let Some(recipient) = recipient.filter(|r| !r.trim().is_empty()) {
            self.recipient = recipient.trim().to_string();
        }
        if let Some(api_key) = api_key {
            self.api_key = Some(api_key);
        }
        self.api_key = self
            .api_key
            .take()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if std::path::Path::new("config.toml").exists() {
            builder = builder.add_source(File::with_name("config"));
        }

        builder = builder.add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let mut app_config: AppConfig = builder.build()?.try_deserialize()?;

        app_config.email.apply_overrides(
            std::env::var("EMAIL_TO").ok(),
            std::env::var("RESEND_API_KEY").ok(),
        );

        app_config.validate()?;

        Ok(app_config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("Server port cannot be 0".to_string()));
        }

        if validate_email_shape(&self.email.recipient).is_err() {
            return Err(ConfigError::Message(format!(
                "Email recipient '{}' is not a valid address",
                self.email.recipient
            )));
        }

        if self.email.api_base_url.trim().is_empty() {
            return Err(ConfigError::Message(
                "Email provider URL cannot be empty".to_string(),
            ));
        }

        if self.email.from.trim().is_empty() {
            return Err(ConfigError::Message(
                "Email sender cannot be empty".to_string(),
            ));
        }

        if self.rate_limit.enable
            && (self.rate_limit.max_requests == 0 || self.rate_limit.window_seconds == 0)
        {
            return Err(ConfigError::Message(
                "Rate limit requests and window must be greater than 0".to_string(),
            ));
        }

        if !self.email.has_credential() {
            tracing::warn!("No email provider credential configured - submissions will only be logged");
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
