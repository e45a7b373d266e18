//! Telegram transport: long polling, command menu and update routing

use std::sync::Arc;

use anyhow::{Context, Result};
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::{debug, info, warn};

use super::commands::Command;
use super::dispatcher::CommandDispatcher;
use super::message::IncomingMessage;

/// Register the command menu shown by Telegram clients
pub async fn register_menu(bot: &Bot) -> Result<()> {
    let commands = Command::bot_commands();
    let count = commands.len();
    bot.set_my_commands(commands)
        .await
        .context("Failed to register the bot command menu")?;
    info!(commands = count, "Command menu registered");
    Ok(())
}

/// Username of the bot, used to recognize `/command@username`
pub async fn fetch_username(bot: &Bot) -> Option<String> {
    match bot.get_me().await {
        Ok(me) => me.user.username,
        Err(e) => {
            warn!(error = %e, "Could not fetch bot username, addressed commands will be ignored");
            None
        }
    }
}

/// Long-poll Telegram until interrupted
///
/// Updates of one chat are handled in order; different chats are handled
/// concurrently.
pub async fn run(bot: Bot, dispatcher: Arc<CommandDispatcher>) {
    let handler = Update::filter_message().endpoint(handle_message);

    info!("Starting update dispatcher");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![dispatcher])
        .default_handler(|upd| async move {
            debug!(update_id = ?upd.id, "Unhandled update");
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "An error from the update listener",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

async fn handle_message(msg: Message, dispatcher: Arc<CommandDispatcher>) -> ResponseResult<()> {
    match IncomingMessage::from_telegram(&msg) {
        Some(incoming) => dispatcher.dispatch(&incoming).await,
        None => debug!(chat_id = %msg.chat.id, "Ignoring message without text or sender"),
    }
    Ok(())
}
