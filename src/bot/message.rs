//! Transport-neutral message types and the reply sink

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use teloxide::prelude::*;
use teloxide::types::ParseMode;

/// A text message received from a chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub chat_id: i64,
    pub sender_id: u64,
    /// First name of the sender
    pub sender_name: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl IncomingMessage {
    pub fn new(chat_id: i64, sender_id: u64, sender_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            sender_id,
            sender_name: sender_name.into(),
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    /// Extract a text message with a known sender from a Telegram message
    pub fn from_telegram(msg: &Message) -> Option<Self> {
        let user = msg.from.as_ref()?;
        let text = msg.text()?;

        Some(Self {
            chat_id: msg.chat.id.0,
            sender_id: user.id.0,
            sender_name: user.first_name.clone(),
            text: text.to_string(),
            timestamp: msg.date,
        })
    }
}

/// How the text of a reply is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyFormat {
    /// Telegram HTML markup
    Html,
    /// A bare URL, sent as plain text so the client renders its preview
    Link,
}

/// A message to deliver to a chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundReply {
    pub chat_id: i64,
    pub text: String,
    pub format: ReplyFormat,
}

impl OutboundReply {
    pub fn html(chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            format: ReplyFormat::Html,
        }
    }

    pub fn link(chat_id: i64, url: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: url.into(),
            format: ReplyFormat::Link,
        }
    }
}

/// Delivers replies to chats
#[async_trait]
pub trait ReplySink: Send + Sync {
    async fn deliver(&self, reply: OutboundReply) -> Result<()>;
}

/// Reply sink backed by the Telegram Bot API
#[derive(Clone)]
pub struct TelegramSink {
    bot: Bot,
}

impl TelegramSink {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl ReplySink for TelegramSink {
    async fn deliver(&self, reply: OutboundReply) -> Result<()> {
        let chat_id = ChatId(reply.chat_id);
        match reply.format {
            ReplyFormat::Html => {
                self.bot
                    .send_message(chat_id, reply.text)
                    .parse_mode(ParseMode::Html)
                    .await?;
            }
            ReplyFormat::Link => {
                self.bot.send_message(chat_id, reply.text).await?;
            }
        }
        Ok(())
    }
}
