//! Command recognition for incoming text

use teloxide::utils::command::BotCommands;
use tracing::debug;

use crate::dialogue::PendingStep;
use crate::translation::Language;

/// Commands understood by the bot
///
/// The descriptions double as the Telegram command menu; `/start` stays off it.
#[derive(BotCommands, Debug, Clone, PartialEq, Eq)]
#[command(rename_rule = "snake_case", description = "Команды бота:")]
pub enum Command {
    #[command(hide)]
    Start,
    #[command(description = "Команды бота")]
    Help,
    #[command(description = "События дня")]
    Day,
    #[command(description = "Узнать значение в WikiPedia")]
    Wiki(String),
    #[command(description = "Перевести на Русский")]
    TrRus(String),
    #[command(description = "Перевести на English")]
    TrEng(String),
    #[command(description = "Мне скучно! Что делать?")]
    Boring,
    #[command(rename = "yesno", description = "У меня важный вопрос! Да или Нет?")]
    YesNo,
    #[command(description = "Показать ваш ID и ID чата")]
    ShowId,
}

impl Command {
    /// Recognize a command at the start of `text`
    ///
    /// Command names match case-insensitively and may be separated from their
    /// argument by any whitespace. A `/cmd@name` suffix is accepted only when
    /// `name` is this bot; without a known username every addressed command
    /// is rejected.
    pub fn recognize(text: &str, bot_username: Option<&str>) -> Option<Command> {
        let text = text.trim();
        let (token, rest) = text
            .split_once(char::is_whitespace)
            .unwrap_or((text, ""));
        if !token.starts_with('/') {
            return None;
        }

        let normalized = format!("{} {}", token.to_lowercase(), rest.trim());
        match Command::parse(&normalized, bot_username.unwrap_or_default()) {
            Ok(command) => Some(command),
            Err(e) => {
                debug!(error = %e, "Not a command for this bot");
                None
            }
        }
    }

    /// Name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Help => "help",
            Command::Day => "day",
            Command::Wiki(_) => "wiki",
            Command::TrRus(_) => "tr_rus",
            Command::TrEng(_) => "tr_eng",
            Command::Boring => "boring",
            Command::YesNo => "yesno",
            Command::ShowId => "show_id",
        }
    }

    /// Step started by `/wiki`, `/tr_rus` or `/tr_eng`, with the text typed
    /// after the command
    pub fn step(&self) -> Option<(PendingStep, Option<&str>)> {
        let (step, argument) = match self {
            Command::Wiki(argument) => (PendingStep::WikiLookup, argument),
            Command::TrRus(argument) => (
                PendingStep::Translate {
                    target: Language::Russian,
                },
                argument,
            ),
            Command::TrEng(argument) => (
                PendingStep::Translate {
                    target: Language::English,
                },
                argument,
            ),
            _ => return None,
        };
        let argument = argument.trim();
        Some((step, (!argument.is_empty()).then_some(argument)))
    }
}

/// Command a user types to start `step` again, e.g. `/tr_rus`
pub fn retry_command(step: PendingStep) -> &'static str {
    match step {
        PendingStep::WikiLookup => "/wiki",
        PendingStep::Translate {
            target: Language::Russian,
        } => "/tr_rus",
        PendingStep::Translate {
            target: Language::English,
        } => "/tr_eng",
    }
}
