//! Command dispatcher: routes every incoming message either to the step the
//! chat is waiting on or to the handler of the command it carries.

use std::future::Future;

use anyhow::Result;
use tracing::{debug, error, info, info_span, Instrument};

use crate::dialogue::PendingStep;

use super::commands::Command;
use super::context::BotContext;
use super::handlers;
use super::message::IncomingMessage;

/// Routes messages to handlers
///
/// Per chat this is a two-state machine: idle, or waiting for the argument of
/// `/wiki`, `/tr_rus` or `/tr_eng`. A waiting chat hands its next message to
/// the pending step, whatever that message says.
pub struct CommandDispatcher {
    ctx: BotContext,
    bot_username: Option<String>,
}

impl CommandDispatcher {
    pub fn new(ctx: BotContext, bot_username: Option<String>) -> Self {
        Self { ctx, bot_username }
    }

    pub fn context(&self) -> &BotContext {
        &self.ctx
    }

    /// Handle one incoming message. Never fails: every error is logged here.
    pub async fn dispatch(&self, msg: &IncomingMessage) {
        let span = info_span!("update", chat_id = msg.chat_id, user_id = msg.sender_id);
        async {
            if let Err(e) = self.route(msg).await {
                error!(error = %e, "Failed to route message");
            }
        }
        .instrument(span)
        .await
    }

    async fn route(&self, msg: &IncomingMessage) -> Result<()> {
        if self.consume_if_armed(msg).await? {
            return Ok(());
        }

        match Command::recognize(&msg.text, self.bot_username.as_deref()) {
            Some(command) => {
                self.guarded(command.name(), msg, self.run_command(&command, msg))
                    .await;
            }
            None => debug!("Ignoring message without a known command"),
        }
        Ok(())
    }

    /// Run the step armed for the message's chat, if there is one
    ///
    /// Returns `true` when the message was consumed by a step.
    pub async fn consume_if_armed(&self, msg: &IncomingMessage) -> Result<bool> {
        let Some(step) = self.ctx.steps.take(msg.chat_id).await? else {
            return Ok(false);
        };

        let name = match step {
            PendingStep::WikiLookup => "wiki step",
            PendingStep::Translate { .. } => "translate step",
        };
        self.guarded(
            name,
            msg,
            handlers::run_step(&self.ctx, msg.chat_id, step, &msg.text),
        )
        .await;
        Ok(true)
    }

    async fn run_command(&self, command: &Command, msg: &IncomingMessage) -> Result<()> {
        let ctx = &self.ctx;
        if let Some((step, argument)) = command.step() {
            return handlers::begin_step(ctx, msg, step, argument).await;
        }

        match command {
            Command::Start => handlers::start(ctx, msg).await,
            Command::Help => handlers::help(ctx, msg).await,
            Command::Day => handlers::day(ctx, msg).await,
            Command::Boring => handlers::boring(ctx, msg).await,
            Command::YesNo => handlers::yes_no(ctx, msg).await,
            Command::ShowId => handlers::show_id(ctx, msg).await,
            Command::Wiki(_) | Command::TrRus(_) | Command::TrEng(_) => Ok(()),
        }
    }

    /// Wrapper applied around every handler: logs the request and swallows
    /// the handler's error after logging it
    async fn guarded<F>(&self, handler: &'static str, msg: &IncomingMessage, fut: F)
    where
        F: Future<Output = Result<()>>,
    {
        info!(handler, text = %msg.text, user = %msg.sender_name, "Received request");
        if let Err(e) = fut.await {
            error!(handler, error = %e, "Handler failed");
        }
    }
}
