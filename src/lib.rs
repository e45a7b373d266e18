//! # Grase Telegram Bot
//!
//! A Telegram bot that answers a handful of commands by calling external
//! services: trivia of the day, activity suggestions, a yes/no oracle,
//! machine translation and Wikipedia lookups.

pub mod api_client;
pub mod bot;
pub mod config;
pub mod dialogue;
pub mod encyclopedia;
pub mod errors;
pub mod localization;
pub mod translation;
