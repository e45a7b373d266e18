//! Pending-step dialogue module: remembers, per chat, which command is waiting
//! for its argument on the next message.

use std::sync::Arc;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use teloxide::dispatching::dialogue::{Dialogue, InMemStorage};
use teloxide::types::ChatId;

use crate::translation::Language;

/// Maximum length of an encyclopedia title
pub const MAX_TITLE_CHARS: usize = 255;
/// Maximum length of a text sent for translation
pub const MAX_TRANSLATION_CHARS: usize = 5000;

/// A command waiting for the next free-text message of a chat
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingStep {
    /// /wiki: the next message is the title to look up
    WikiLookup,
    /// /tr_rus and /tr_eng: the next message is the text to translate
    Translate { target: Language },
}

impl PendingStep {
    /// Longest payload accepted for this step
    pub fn max_input_chars(self) -> usize {
        match self {
            PendingStep::WikiLookup => MAX_TITLE_CHARS,
            PendingStep::Translate { .. } => MAX_TRANSLATION_CHARS,
        }
    }
}

/// Type alias for the per-chat pending-step dialogue
pub type StepDialogue = Dialogue<PendingStep, InMemStorage<PendingStep>>;

/// Single-slot registry of pending steps, keyed by chat
///
/// A chat with no stored dialogue is idle. Arming stores the step, replacing
/// any earlier one; taking removes it, so each step runs at most once.
#[derive(Clone)]
pub struct PendingSteps {
    storage: Arc<InMemStorage<PendingStep>>,
}

impl Default for PendingSteps {
    fn default() -> Self {
        Self::new()
    }
}

impl PendingSteps {
    pub fn new() -> Self {
        Self {
            storage: InMemStorage::new(),
        }
    }

    /// Dialogue handle for one chat
    pub fn dialogue(&self, chat_id: i64) -> StepDialogue {
        Dialogue::new(Arc::clone(&self.storage), ChatId(chat_id))
    }

    /// Install `step` for the chat; the last arm wins
    pub async fn arm(&self, chat_id: i64, step: PendingStep) -> Result<()> {
        self.dialogue(chat_id).update(step).await?;
        Ok(())
    }

    /// Step currently armed for the chat, if any
    pub async fn pending(&self, chat_id: i64) -> Result<Option<PendingStep>> {
        Ok(self.dialogue(chat_id).get().await?)
    }

    /// Remove and return the armed step, leaving the chat idle
    pub async fn take(&self, chat_id: i64) -> Result<Option<PendingStep>> {
        let dialogue = self.dialogue(chat_id);
        match dialogue.get().await? {
            Some(step) => {
                dialogue.exit().await?;
                Ok(Some(step))
            }
            None => Ok(None),
        }
    }
}

/// Validates the payload of a pending step
pub fn validate_step_input(input: &str, max_chars: usize) -> Result<String, &'static str> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err("empty");
    }

    if trimmed.chars().count() > max_chars {
        return Err("too_long");
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_input_validation() {
        // Valid input
        assert!(validate_step_input("Мир", MAX_TITLE_CHARS).is_ok());
        assert!(validate_step_input("  /day  ", MAX_TITLE_CHARS).is_ok());

        // Invalid input
        assert_eq!(validate_step_input("", MAX_TITLE_CHARS), Err("empty"));
        assert_eq!(validate_step_input(" \n ", MAX_TITLE_CHARS), Err("empty"));
        assert_eq!(
            validate_step_input(&"я".repeat(256), MAX_TITLE_CHARS),
            Err("too_long")
        );
    }

    #[test]
    fn test_step_input_trimming() {
        let result = validate_step_input("  hello world  ", MAX_TRANSLATION_CHARS);
        assert_eq!(result.unwrap(), "hello world");
    }

    #[test]
    fn test_input_limits_per_step() {
        assert_eq!(PendingStep::WikiLookup.max_input_chars(), MAX_TITLE_CHARS);
        assert_eq!(
            PendingStep::Translate {
                target: Language::English
            }
            .max_input_chars(),
            MAX_TRANSLATION_CHARS
        );
    }
}
