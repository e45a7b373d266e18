//! # Encyclopedia Lookup Module
//!
//! Page-by-title lookups against the MediaWiki action API of a single
//! Wikipedia language edition. The adapter reports whether the article
//! exists, a summary cut to [`SUMMARY_LIMIT`] characters and the canonical URL.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::{ApiResult, BotError};

/// Maximum number of summary characters kept before the ellipsis
pub const SUMMARY_LIMIT: usize = 1024;
pub const ELLIPSIS: &str = "...";

/// Outcome of a lookup
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WikiPage {
    pub exists: bool,
    /// Introduction of the article, already truncated
    pub summary: String,
    /// Canonical URL of the article
    pub url: String,
}

impl WikiPage {
    pub fn not_found() -> Self {
        Self::default()
    }

    /// Turn a page that does not exist into [`BotError::LookupNotFound`]
    pub fn found(self, title: &str) -> ApiResult<Self> {
        if self.exists {
            Ok(self)
        } else {
            Err(BotError::LookupNotFound(title.to_string()))
        }
    }
}

/// Encyclopedia lookup service
#[async_trait]
pub trait Encyclopedia: Send + Sync {
    async fn lookup(&self, title: &str) -> ApiResult<WikiPage>;
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    query: Option<QueryBody>,
}

#[derive(Debug, Deserialize)]
struct QueryBody {
    #[serde(default)]
    pages: Vec<PageEntry>,
}

#[derive(Debug, Deserialize)]
struct PageEntry {
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    #[serde(default)]
    extract: String,
    fullurl: Option<String>,
}

/// Wikipedia client for one language edition
#[derive(Debug, Clone)]
pub struct WikipediaClient {
    http: reqwest::Client,
    api_url: String,
    language: String,
    timeout: Duration,
}

impl WikipediaClient {
    pub fn new(
        http: reqwest::Client,
        api_url: impl Into<String>,
        language: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            http,
            api_url: api_url.into(),
            language: language.into(),
            timeout,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}

#[async_trait]
impl Encyclopedia for WikipediaClient {
    async fn lookup(&self, title: &str) -> ApiResult<WikiPage> {
        debug!(title = %title, language = %self.language, "Looking up article");

        let response = self
            .http
            .get(&self.api_url)
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("formatversion", "2"),
                ("prop", "extracts|info"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("inprop", "url"),
                ("redirects", "1"),
                ("titles", title),
            ])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Encyclopedia unreachable");
                BotError::from_transport(&e)
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "Encyclopedia returned an error status");
            return Err(BotError::NonSuccessStatus(status.as_u16()));
        }

        let body: QueryResponse = response
            .json()
            .await
            .map_err(|e| BotError::MalformedResponse(e.to_string()))?;

        let page = body
            .query
            .and_then(|query| query.pages.into_iter().next())
            .filter(|page| !page.missing && !page.invalid);

        Ok(match page {
            Some(page) => WikiPage {
                exists: true,
                summary: truncate_summary(&page.extract, SUMMARY_LIMIT),
                url: page.fullurl.unwrap_or_default(),
            },
            None => WikiPage::not_found(),
        })
    }
}

/// Cut `text` to at most `limit` characters without splitting a word
///
/// Text that already fits is returned trimmed and without an ellipsis.
/// Otherwise the text is cut at `limit` characters, trimmed back to the last
/// whole word, and [`ELLIPSIS`] is appended.
pub fn truncate_summary(text: &str, limit: usize) -> String {
    let text = text.trim();
    let cut = match text.char_indices().nth(limit) {
        Some((index, _)) => index,
        None => return text.to_string(),
    };

    let (head, rest) = text.split_at(cut);
    let kept = if rest.starts_with(char::is_whitespace) {
        head
    } else {
        // Last word is incomplete
        match head.rfind(char::is_whitespace) {
            Some(index) => &head[..index],
            None => "",
        }
    };

    format!("{}{}", kept.trim_end(), ELLIPSIS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_summary_is_untouched() {
        assert_eq!(truncate_summary("  Мир — планета.  ", 1024), "Мир — планета.");
        assert_eq!(truncate_summary("", 1024), "");
    }

    #[test]
    fn test_cut_drops_partial_word() {
        assert_eq!(truncate_summary("alpha beta gamma", 8), "alpha...");
        assert_eq!(truncate_summary("alpha beta gamma", 10), "alpha beta...");
        assert_eq!(truncate_summary("alpha beta gamma", 11), "alpha beta...");
    }

    #[test]
    fn test_cut_counts_characters_not_bytes() {
        let text = "слово ".repeat(400);
        let result = truncate_summary(&text, SUMMARY_LIMIT);

        assert!(result.ends_with(ELLIPSIS));
        let body = result.trim_end_matches(ELLIPSIS);
        assert!(body.chars().count() <= SUMMARY_LIMIT);
        assert!(body.split(' ').all(|word| word == "слово"));
    }

    #[test]
    fn test_single_long_word() {
        assert_eq!(truncate_summary(&"a".repeat(2000), SUMMARY_LIMIT), ELLIPSIS);
    }

    #[test]
    fn test_not_found_page() {
        let result = WikiPage::not_found().found("Несуществующее");
        assert_eq!(
            result,
            Err(BotError::LookupNotFound("Несуществующее".to_string()))
        );
    }
}
