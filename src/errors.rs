//! # Error Types Module
//!
//! Errors produced by the external service adapters and by startup
//! configuration. Per-request errors never leave a handler: they are turned
//! into a user-facing reply. Startup errors are fatal.

use thiserror::Error;

/// Result of a call to one of the external services
pub type ApiResult<T> = std::result::Result<T, BotError>;

/// Custom error types for the bot
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BotError {
    /// Network failure or timeout while talking to a service
    #[error("Service unreachable: {0}")]
    TransportUnreachable(String),
    /// The service answered with a status other than 200
    #[error("Service returned status {0}")]
    NonSuccessStatus(u16),
    /// The service answered 200 but the body could not be used
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    /// The translation service failed or returned nothing
    #[error("Translation unavailable: {0}")]
    TranslationUnavailable(String),
    /// The encyclopedia has no article for the title
    #[error("No article found for '{0}'")]
    LookupNotFound(String),
    /// A required configuration value is absent
    #[error("Missing configuration value: {0}")]
    StartupConfigMissing(String),
    /// A configuration value is present but unusable
    #[error("Invalid configuration value for {key}: '{value}'")]
    StartupConfigInvalid { key: String, value: String },
}

impl BotError {
    /// Classify a reqwest failure that happened before a status was known
    pub fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            BotError::TransportUnreachable(format!("timed out: {err}"))
        } else {
            BotError::TransportUnreachable(err.to_string())
        }
    }
}
