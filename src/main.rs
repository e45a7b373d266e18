use std::sync::Arc;

use anyhow::{Context, Result};
use teloxide::prelude::*;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use grase_bot::api_client::ApiClient;
use grase_bot::bot::{telegram, BotContext, CommandDispatcher, TelegramSink};
use grase_bot::config::{Config, LogFormat};
use grase_bot::encyclopedia::WikipediaClient;
use grase_bot::localization::LocalizationManager;
use grase_bot::translation::GoogleTranslator;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Initialize the tracing subscriber
fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,grase_bot=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // A broken configuration is reported by run() once logging is up
    let log_format = Config::from_env()
        .map(|config| config.log_format)
        .unwrap_or_default();
    init_tracing(log_format);

    info!("Grase Telegram bot starting service...");

    if let Err(e) = run().await {
        error!("Bot stopped on a startup failure: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;

    let texts = LocalizationManager::new().context("Failed to load reply texts")?;

    let bot = Bot::new(&config.bot_token);
    telegram::register_menu(&bot).await?;
    let bot_username = telegram::fetch_username(&bot).await;

    let http = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .context("Failed to initialize the HTTP client")?;

    let api = ApiClient::new(http.clone(), config.endpoints.clone(), config.http_timeout);
    let translator =
        GoogleTranslator::new(http.clone(), config.translate_url.clone(), config.http_timeout);
    let encyclopedia = WikipediaClient::new(
        http,
        config.wiki_api_url.clone(),
        config.wiki_language.clone(),
        config.http_timeout,
    );
    info!(language = %encyclopedia.language(), "Encyclopedia client ready");

    let ctx = BotContext::new(
        Arc::new(TelegramSink::new(bot.clone())),
        api,
        Arc::new(translator),
        Arc::new(encyclopedia),
        texts,
    )
    .with_owner_contact(config.owner_contact.clone());

    let dispatcher = Arc::new(CommandDispatcher::new(ctx, bot_username));

    info!("Starting the command processing loop...");
    telegram::run(bot, dispatcher).await;

    Ok(())
}
