//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules:
//! - `commands`: Recognizes commands in incoming text
//! - `message`: Incoming and outgoing message types, reply sinks
//! - `context`: Dependencies shared by the handlers
//! - `handlers`: One handler per command, plus the pending-step continuations
//! - `dispatcher`: Routes messages to pending steps or command handlers
//! - `telegram`: Long polling and command menu registration

pub mod commands;
pub mod context;
pub mod dispatcher;
pub mod handlers;
pub mod message;
pub mod telegram;

// Re-export the types used to wire the bot together
pub use commands::Command;
pub use context::BotContext;
pub use dispatcher::CommandDispatcher;
pub use message::{IncomingMessage, OutboundReply, ReplyFormat, ReplySink, TelegramSink};
