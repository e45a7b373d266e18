//! Dependencies shared by every handler

use std::sync::Arc;

use tracing::error;

use crate::api_client::ApiClient;
use crate::dialogue::PendingSteps;
use crate::encyclopedia::Encyclopedia;
use crate::errors::BotError;
use crate::localization::LocalizationManager;
use crate::translation::Translator;

use super::message::{OutboundReply, ReplySink};

/// Everything a handler needs: the reply sink, the external services, the
/// pending-step registry and the reply texts
pub struct BotContext {
    pub sink: Arc<dyn ReplySink>,
    pub api: ApiClient,
    pub translator: Arc<dyn Translator>,
    pub encyclopedia: Arc<dyn Encyclopedia>,
    pub steps: PendingSteps,
    pub texts: LocalizationManager,
    /// Contact line appended to /help
    pub owner_contact: Option<String>,
}

impl BotContext {
    pub fn new(
        sink: Arc<dyn ReplySink>,
        api: ApiClient,
        translator: Arc<dyn Translator>,
        encyclopedia: Arc<dyn Encyclopedia>,
        texts: LocalizationManager,
    ) -> Self {
        Self {
            sink,
            api,
            translator,
            encyclopedia,
            steps: PendingSteps::new(),
            texts,
            owner_contact: None,
        }
    }

    pub fn with_owner_contact(mut self, contact: Option<String>) -> Self {
        self.owner_contact = contact;
        self
    }

    /// Deliver a reply; a failed delivery is logged and dropped
    pub async fn send(&self, reply: OutboundReply) {
        let chat_id = reply.chat_id;
        if let Err(e) = self.sink.deliver(reply).await {
            error!(chat_id, error = %e, "Failed to deliver reply");
        }
    }

    pub async fn send_html(&self, chat_id: i64, text: impl Into<String>) {
        self.send(OutboundReply::html(chat_id, text)).await;
    }

    pub async fn send_link(&self, chat_id: i64, url: impl Into<String>) {
        self.send(OutboundReply::link(chat_id, url)).await;
    }

    /// User-facing text for a failed call to one of the plain HTTP services
    pub fn service_error_text(&self, err: &BotError) -> String {
        match err {
            BotError::NonSuccessStatus(code) => {
                self.texts.t_args("error-status", &[("code", &code.to_string())])
            }
            BotError::MalformedResponse(_) => self.texts.t("error-malformed"),
            _ => self.texts.t("error-unreachable"),
        }
    }
}
