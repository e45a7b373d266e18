//! Command handlers
//!
//! Each handler runs one command to completion and emits its replies through
//! the context. Failures of the external services are turned into replies
//! here; the `Result` only carries registry errors.

use anyhow::Result;
use chrono::Local;
use teloxide::utils::html::escape;
use tracing::{info, warn};

use crate::dialogue::{validate_step_input, PendingStep};
use crate::errors::BotError;
use crate::translation::Language;

use super::commands::retry_command;
use super::context::BotContext;
use super::message::IncomingMessage;

/// Text shown to the user after an attempt to translate it into Russian
enum Localized {
    Translated(String),
    /// Translation failed; the original English text
    Original(String),
}

/// Translate informational text into Russian, falling back to the original
async fn localize(ctx: &BotContext, text: String) -> Localized {
    match ctx.translator.translate(&text, Language::Russian).await {
        Ok(translated) if !translated.trim().is_empty() => Localized::Translated(translated),
        Ok(_) => {
            warn!("Translation came back empty, showing original text");
            Localized::Original(text)
        }
        Err(e) => {
            warn!(error = %e, "Translation failed, showing original text");
            Localized::Original(text)
        }
    }
}

/// Greet the user
pub async fn start(ctx: &BotContext, msg: &IncomingMessage) -> Result<()> {
    let greeting = format!(
        "{}\n\n{}",
        ctx.texts
            .t_args("start-greeting", &[("name", &escape(&msg.sender_name))]),
        ctx.texts.t("start-help-hint")
    );
    ctx.send_html(msg.chat_id, greeting).await;
    Ok(())
}

/// Describe every command
pub async fn help(ctx: &BotContext, msg: &IncomingMessage) -> Result<()> {
    let mut sections = vec![
        ctx.texts.t("help-title"),
        ctx.texts.t("help-day"),
        ctx.texts.t("help-wiki"),
        ctx.texts.t("help-tr-rus"),
        ctx.texts.t("help-tr-eng"),
        ctx.texts.t("help-boring"),
        ctx.texts.t("help-yesno"),
        ctx.texts.t("help-show-id"),
    ];
    if let Some(contact) = &ctx.owner_contact {
        sections.push(ctx.texts.t_args("help-contact", &[("contact", &escape(contact))]));
    }

    ctx.send_html(msg.chat_id, sections.join("\n\n")).await;
    Ok(())
}

/// Trivia fact about today, translated into Russian
pub async fn day(ctx: &BotContext, msg: &IncomingMessage) -> Result<()> {
    let today = Local::now().date_naive();

    let body = match ctx.api.day_fact(today).await {
        Ok(fact) => {
            let (intro, fact) = match localize(ctx, fact).await {
                Localized::Translated(text) => (ctx.texts.t("day-intro"), text),
                Localized::Original(text) => (ctx.texts.t("day-intro-untranslated"), text),
            };
            format!("{intro}\n\n- <i>{}</i>", escape(&fact))
        }
        Err(e) => {
            warn!(error = %e, "Trivia service failed");
            ctx.service_error_text(&e)
        }
    };

    ctx.send_html(msg.chat_id, format!("{body}\n\n{}", ctx.texts.t("day-again")))
        .await;
    Ok(())
}

/// Something to do when bored, translated into Russian
pub async fn boring(ctx: &BotContext, msg: &IncomingMessage) -> Result<()> {
    match ctx.api.activity().await {
        Ok(activity) => {
            let link = activity.link().map(str::to_string);
            let (intro, suggestion) = match localize(ctx, activity.activity).await {
                Localized::Translated(text) => (ctx.texts.t("boring-intro"), text),
                Localized::Original(text) => (ctx.texts.t("boring-intro-untranslated"), text),
            };
            ctx.send_html(
                msg.chat_id,
                format!("{intro}\n\n- <i>{}</i>", escape(&suggestion)),
            )
            .await;

            if let Some(link) = link {
                ctx.send_html(
                    msg.chat_id,
                    ctx.texts.t_args("boring-link", &[("link", &escape(&link))]),
                )
                .await;
            }
        }
        Err(e) => {
            warn!(error = %e, "Activity service failed");
            ctx.send_html(msg.chat_id, ctx.service_error_text(&e)).await;
        }
    }

    ctx.send_html(msg.chat_id, ctx.texts.t("boring-again")).await;
    Ok(())
}

/// Yes or no, as an image
pub async fn yes_no(ctx: &BotContext, msg: &IncomingMessage) -> Result<()> {
    match ctx.api.yes_no().await {
        Ok(verdict) => {
            info!(answer = %verdict.answer, "Yes/no verdict received");
            ctx.send_link(msg.chat_id, verdict.image).await;
        }
        Err(e) => {
            warn!(error = %e, "Yes/no service failed");
            ctx.send_html(msg.chat_id, ctx.service_error_text(&e)).await;
        }
    }

    ctx.send_html(msg.chat_id, ctx.texts.t("yesno-again")).await;
    Ok(())
}

/// Report the sender id and the chat id
pub async fn show_id(ctx: &BotContext, msg: &IncomingMessage) -> Result<()> {
    let text = [
        ctx.texts.t("show-id-title"),
        ctx.texts
            .t_args("show-id-user", &[("user_id", &msg.sender_id.to_string())]),
        ctx.texts
            .t_args("show-id-chat", &[("chat_id", &msg.chat_id.to_string())]),
    ]
    .join("\n");

    ctx.send_html(msg.chat_id, text).await;
    Ok(())
}

/// Start a step: run it right away when the command carried its argument,
/// otherwise prompt for the argument and arm the step for the next message
pub async fn begin_step(
    ctx: &BotContext,
    msg: &IncomingMessage,
    step: PendingStep,
    argument: Option<&str>,
) -> Result<()> {
    if let Some(argument) = argument {
        return run_step(ctx, msg.chat_id, step, argument).await;
    }

    let prompt = match step {
        PendingStep::WikiLookup => ctx.texts.t("wiki-prompt"),
        PendingStep::Translate { target } => ctx
            .texts
            .t_args("tr-prompt", &[("target", &target_text(ctx, target))]),
    };
    ctx.send_html(msg.chat_id, prompt).await;

    ctx.steps.arm(msg.chat_id, step).await?;
    info!(step = ?step, "Waiting for the next message");
    Ok(())
}

/// Run a step with its payload
pub async fn run_step(ctx: &BotContext, chat_id: i64, step: PendingStep, input: &str) -> Result<()> {
    let command = retry_command(step);

    let input = match validate_step_input(input, step.max_input_chars()) {
        Ok(input) => input,
        Err("too_long") => {
            let limit = step.max_input_chars().to_string();
            ctx.send_html(
                chat_id,
                ctx.texts
                    .t_args("input-too-long", &[("limit", limit.as_str()), ("command", command)]),
            )
            .await;
            return Ok(());
        }
        Err(_) => {
            ctx.send_html(chat_id, ctx.texts.t_args("input-empty", &[("command", command)]))
                .await;
            return Ok(());
        }
    };

    match step {
        PendingStep::WikiLookup => wiki_lookup(ctx, chat_id, &input).await,
        PendingStep::Translate { target } => translate(ctx, chat_id, &input, target).await,
    }
}

fn target_text(ctx: &BotContext, target: Language) -> String {
    match target {
        Language::Russian => ctx.texts.t("target-ru"),
        Language::English => ctx.texts.t("target-en"),
    }
}

/// Look the title up and reply with the summary and the article link
async fn wiki_lookup(ctx: &BotContext, chat_id: i64, query: &str) -> Result<()> {
    ctx.send_html(
        chat_id,
        ctx.texts.t_args("wiki-echo", &[("query", &escape(query))]),
    )
    .await;

    match ctx.encyclopedia.lookup(query).await.and_then(|page| page.found(query)) {
        Ok(page) => {
            if !page.summary.is_empty() {
                ctx.send_html(chat_id, escape(&page.summary)).await;
            }
            ctx.send_html(
                chat_id,
                ctx.texts.t_args("wiki-more", &[("url", &escape(&page.url))]),
            )
            .await;
            ctx.send_html(chat_id, ctx.texts.t("wiki-again")).await;
        }
        Err(BotError::LookupNotFound(title)) => {
            info!(title = %title, "No article found");
            ctx.send_html(chat_id, ctx.texts.t("wiki-not-found")).await;
        }
        Err(e) => {
            warn!(error = %e, "Encyclopedia lookup failed");
            ctx.send_html(chat_id, ctx.texts.t("wiki-unavailable")).await;
        }
    }
    Ok(())
}

/// Translate the text and reply with the result
///
/// On failure only the apology is sent; no translation reply is formatted.
async fn translate(ctx: &BotContext, chat_id: i64, text: &str, target: Language) -> Result<()> {
    let command = retry_command(PendingStep::Translate { target });

    ctx.send_html(
        chat_id,
        ctx.texts.t_args(
            "tr-echo",
            &[("target", &target_text(ctx, target)), ("query", &escape(text))],
        ),
    )
    .await;

    match ctx.translator.translate(text, target).await {
        Ok(translated) => {
            ctx.send_html(
                chat_id,
                ctx.texts.t_args("tr-result", &[("text", &escape(&translated))]),
            )
            .await;
            ctx.send_html(chat_id, ctx.texts.t_args("tr-again", &[("command", command)]))
                .await;
        }
        Err(e) => {
            warn!(error = %e, target_language = %target, "Translation failed");
            ctx.send_html(
                chat_id,
                ctx.texts.t_args("tr-unavailable", &[("command", command)]),
            )
            .await;
        }
    }
    Ok(())
}
