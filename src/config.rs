//! # Configuration Module
//!
//! Runtime configuration read from the environment (after `.env` has been
//! loaded by `dotenv`). Only the bot token is required; every endpoint can be
//! overridden, which is how the tests point the bot at local mock servers.

use std::time::Duration;

use crate::errors::BotError;

// Defaults for the external services
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_NUMBERS_API_URL: &str = "http://numbersapi.com";
pub const DEFAULT_BORED_API_URL: &str = "https://www.boredapi.com/api/activity/";
pub const DEFAULT_YESNO_API_URL: &str = "https://yesno.wtf/api";
pub const DEFAULT_TRANSLATE_API_URL: &str = "https://translate.googleapis.com/translate_a/single";
pub const DEFAULT_WIKI_LANGUAGE: &str = "ru";

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// URLs of the plain HTTP services used by the informational commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Base of the trivia service; `/{MM}/{DD}/date` is appended
    pub numbers_base: String,
    /// Random activity service
    pub bored: String,
    /// Yes/no oracle
    pub yesno: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            numbers_base: DEFAULT_NUMBERS_API_URL.to_string(),
            bored: DEFAULT_BORED_API_URL.to_string(),
            yesno: DEFAULT_YESNO_API_URL.to_string(),
        }
    }
}

/// Complete bot configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    /// Timeout applied to every outbound HTTP call
    pub http_timeout: Duration,
    pub endpoints: Endpoints,
    pub translate_url: String,
    pub wiki_language: String,
    pub wiki_api_url: String,
    /// Contact line shown at the bottom of /help
    pub owner_contact: Option<String>,
    pub log_format: LogFormat,
}

impl Config {
    /// Load the configuration from the process environment
    pub fn from_env() -> Result<Self, BotError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load the configuration through an arbitrary key lookup
    ///
    /// Empty values are treated as absent.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BotError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let bot_token =
            get("BOT_TOKEN").ok_or_else(|| BotError::StartupConfigMissing("BOT_TOKEN".into()))?;

        let http_timeout = match get("HTTP_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(BotError::StartupConfigInvalid {
                        key: "HTTP_TIMEOUT_SECS".into(),
                        value: raw,
                    })
                }
            },
            None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        let log_format = match get("LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(BotError::StartupConfigInvalid {
                    key: "LOG_FORMAT".into(),
                    value: other.to_string(),
                })
            }
        };

        let endpoints = Endpoints {
            numbers_base: get("NUMBERS_API_URL").unwrap_or_else(|| DEFAULT_NUMBERS_API_URL.into()),
            bored: get("BORED_API_URL").unwrap_or_else(|| DEFAULT_BORED_API_URL.into()),
            yesno: get("YESNO_API_URL").unwrap_or_else(|| DEFAULT_YESNO_API_URL.into()),
        };

        let wiki_language = get("WIKI_LANGUAGE").unwrap_or_else(|| DEFAULT_WIKI_LANGUAGE.into());
        let wiki_api_url = get("WIKI_API_URL")
            .unwrap_or_else(|| format!("https://{wiki_language}.wikipedia.org/w/api.php"));

        Ok(Self {
            bot_token,
            http_timeout,
            endpoints,
            translate_url: get("TRANSLATE_API_URL")
                .unwrap_or_else(|| DEFAULT_TRANSLATE_API_URL.into()),
            wiki_language,
            wiki_api_url,
            owner_contact: get("BOT_OWNER_CONTACT"),
            log_format,
        })
    }
}
