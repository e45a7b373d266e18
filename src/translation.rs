//! # Translation Adapter Module
//!
//! Wraps the external machine-translation service behind the [`Translator`]
//! trait. The default implementation talks to Google's public web translate
//! endpoint, which auto-detects the source language.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::{ApiResult, BotError};

/// Target languages offered by the bot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    Russian,
    English,
}

impl Language {
    /// Code understood by the translation service
    pub fn code(self) -> &'static str {
        match self {
            Language::Russian => "ru",
            Language::English => "en",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Machine translation service
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` into `target`.
    ///
    /// Every failure, including an empty result, is reported as
    /// [`BotError::TranslationUnavailable`].
    async fn translate(&self, text: &str, target: Language) -> ApiResult<String>;
}

/// Translator backed by the Google web translate endpoint
#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    http: reqwest::Client,
    endpoint: String,
    /// Upper bound for one translation request
    timeout: Duration,
}

impl GoogleTranslator {
    pub fn new(http: reqwest::Client, endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            timeout,
        }
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, target: Language) -> ApiResult<String> {
        debug!(target_language = %target, chars = text.chars().count(), "Translating text");

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target.code()),
                ("dt", "t"),
                ("q", text),
            ])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Translation service unreachable");
                BotError::TranslationUnavailable(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Translation service returned an error status");
            return Err(BotError::TranslationUnavailable(format!(
                "status {}",
                status.as_u16()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| BotError::TranslationUnavailable(e.to_string()))?;

        parse_google_response(&body)
    }
}

/// Concatenate the translated segments of a web translate response
///
/// The response is a nested array; `body[0]` lists the sentence segments and
/// each segment starts with its translated text.
pub fn parse_google_response(body: &Value) -> ApiResult<String> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| BotError::TranslationUnavailable("no translated segments".into()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.trim().is_empty() {
        return Err(BotError::TranslationUnavailable("empty translation".into()));
    }

    Ok(translated)
}
