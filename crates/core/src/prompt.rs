//! Prompt validation and per-video prompt history.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Upper bound on prompt length, in characters.
pub const MAX_PROMPT_CHARS: usize = 2000;

/// Trim a prompt and reject it if nothing is left or it is too long.
pub fn validate_prompt(prompt: &str) -> Result<String, CoreError> {
    let trimmed = prompt.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Prompt must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_PROMPT_CHARS {
        return Err(CoreError::Validation(format!(
            "Prompt must be at most {MAX_PROMPT_CHARS} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// A previously submitted prompt. Sent to the planner as conversation context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptEntry {
    pub prompt: String,
    pub timestamp: Timestamp,
}

impl PromptEntry {
    pub fn now(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Ordered prompt history, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PromptHistory {
    entries: Vec<PromptEntry>,
}

impl PromptHistory {
    pub fn push(&mut self, entry: PromptEntry) {
        self.entries.push(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[PromptEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Owned copy of the entries, suitable for sending over the wire.
    pub fn snapshot(&self) -> Vec<PromptEntry> {
        self.entries.clone()
    }
}
