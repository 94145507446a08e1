//! Application error types

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Startup and infrastructure failures. Request handling never surfaces these;
/// the contact route always answers in its own response shape.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
