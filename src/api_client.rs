//! # Outbound API Client Module
//!
//! Single timed GET requests against the fixed informational endpoints
//! (trivia of the day, random activity, yes/no oracle). A call either yields
//! the body or a [`BotError`] that tells "unreachable" apart from a non-200
//! status. Nothing here retries: the user re-invokes the command instead.

use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::Endpoints;
use crate::errors::{ApiResult, BotError};

/// Suggestion returned by the activity endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Activity {
    pub activity: String,
    /// Optional "learn more" link; the service sends an empty string when absent
    #[serde(default)]
    pub link: String,
}

impl Activity {
    /// The link, if the service provided a usable one
    pub fn link(&self) -> Option<&str> {
        let link = self.link.trim();
        (!link.is_empty()).then_some(link)
    }
}

/// Verdict returned by the yes/no oracle
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct YesNo {
    pub answer: String,
    /// Animated image illustrating the answer
    pub image: String,
}

/// Client for the plain HTTP services
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    endpoints: Endpoints,
    timeout: Duration,
}

impl ApiClient {
    pub fn new(http: reqwest::Client, endpoints: Endpoints, timeout: Duration) -> Self {
        Self {
            http,
            endpoints,
            timeout,
        }
    }

    /// GET `url` and return the body of a 200 response
    pub async fn fetch(&self, url: &str) -> ApiResult<String> {
        debug!(url = %url, "Fetching from external service");

        let response = self
            .http
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "External service unreachable");
                BotError::from_transport(&e)
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(url = %url, status = status.as_u16(), "External service returned an error status");
            return Err(BotError::NonSuccessStatus(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| BotError::from_transport(&e))
    }

    /// URL of the trivia fact for the given calendar day
    pub fn day_fact_url(&self, date: NaiveDate) -> String {
        format!(
            "{}/{:02}/{:02}/date",
            self.endpoints.numbers_base.trim_end_matches('/'),
            date.month(),
            date.day()
        )
    }

    /// Trivia fact about the given calendar day, in English
    pub async fn day_fact(&self, date: NaiveDate) -> ApiResult<String> {
        let body = self.fetch(&self.day_fact_url(date)).await?;
        let fact = body.trim();
        if fact.is_empty() {
            return Err(BotError::MalformedResponse("empty trivia fact".into()));
        }
        Ok(fact.to_string())
    }

    /// Random activity suggestion, in English
    pub async fn activity(&self) -> ApiResult<Activity> {
        let body = self.fetch(&self.endpoints.bored).await?;
        parse_json::<Activity>(&body)
    }

    /// Random yes/no verdict
    pub async fn yes_no(&self) -> ApiResult<YesNo> {
        let body = self.fetch(&self.endpoints.yesno).await?;
        parse_json::<YesNo>(&body)
    }
}

fn parse_json<T: serde::de::DeserializeOwned>(body: &str) -> ApiResult<T> {
    serde_json::from_str(body).map_err(|e| BotError::MalformedResponse(e.to_string()))
}
