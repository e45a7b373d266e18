//! # Localization Tests
//!
//! This module contains unit tests for the localization functionality,
//! testing message retrieval and formatting with various edge cases.

use grase_bot::localization::LocalizationManager;

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_localization() -> LocalizationManager {
        LocalizationManager::new().expect("Failed to create localization manager")
    }

    #[test]
    fn test_get_message_existing_key() {
        let manager = setup_localization();

        let message = manager.t("wiki-again");
        assert_eq!(message, "Еще один запрос: /wiki");
    }

    #[test]
    fn test_get_message_nonexistent_key() {
        let manager = setup_localization();

        let message = manager.t("nonexistent-key");
        assert!(message.starts_with("Missing translation:"));
    }

    #[test]
    fn test_get_message_with_args() {
        let manager = setup_localization();

        let message = manager.t_args("error-status", &[("code", "503")]);
        assert_eq!(message, "<b>Ошибка!</b> Сервер вернул ошибку (503)!");
    }

    #[test]
    fn test_arguments_have_no_isolation_marks() {
        let manager = setup_localization();

        let message = manager.t_args("wiki-echo", &[("query", "Мир")]);
        assert_eq!(message, "Вы хотите найти: '<i>Мир</i>'");
        assert!(!message.contains('\u{2068}'));
    }

    #[test]
    fn test_get_message_missing_args() {
        let manager = setup_localization();

        // Missing args are reported inside the text rather than panicking
        let message = manager.t("boring-link");
        assert!(message.starts_with("Узнать больше:"));
    }

    #[test]
    fn test_every_reply_key_exists() {
        let manager = setup_localization();

        let keys = [
            "start-greeting",
            "start-help-hint",
            "help-title",
            "help-day",
            "help-wiki",
            "help-tr-rus",
            "help-tr-eng",
            "help-boring",
            "help-yesno",
            "help-show-id",
            "help-contact",
            "error-unreachable",
            "error-status",
            "error-malformed",
            "day-intro",
            "day-intro-untranslated",
            "day-again",
            "boring-intro",
            "boring-intro-untranslated",
            "boring-link",
            "boring-again",
            "yesno-again",
            "show-id-title",
            "show-id-user",
            "show-id-chat",
            "wiki-prompt",
            "wiki-echo",
            "wiki-more",
            "wiki-again",
            "wiki-not-found",
            "wiki-unavailable",
            "target-ru",
            "target-en",
            "tr-prompt",
            "tr-echo",
            "tr-result",
            "tr-again",
            "tr-unavailable",
            "input-empty",
            "input-too-long",
        ];

        for key in keys {
            let message = manager.t(key);
            assert!(!message.starts_with("Missing"), "no message for {key}");
        }
    }

    #[test]
    fn test_custom_source() {
        let manager = LocalizationManager::from_source("en", "greeting = Hello, { $name }!")
            .expect("valid resource");

        assert_eq!(manager.t_args("greeting", &[("name", "Ann")]), "Hello, Ann!");
    }

    #[test]
    fn test_invalid_source_is_rejected() {
        assert!(LocalizationManager::from_source("en", "= broken").is_err());
        assert!(LocalizationManager::from_source("not a locale!", "a = b").is_err());
    }
}
