//! Loaded export session.
//!
//! Holds the conversations accepted from one export file, plus a record of
//! the entries that were rejected. Commands receive the session explicitly.

use std::path::Path;

use crate::domain::{AppError, Conversation, Result, SessionStats};
use crate::infrastructure::read_export_file;

use super::extractor::extract_messages;
use super::parser::{parse_conversation, parse_export};

/// An array element that could not be used as a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedEntry {
    /// Position in the source array (0-based).
    pub index: usize,
    /// Why it was rejected.
    pub reason: String,
}

/// Conversations loaded from a single export.
#[derive(Debug, Clone, Default)]
pub struct ExportSession {
    conversations: Vec<Conversation>,
    rejected: Vec<RejectedEntry>,
}

impl ExportSession {
    /// Reads and parses an export file.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or is not a JSON array.
    pub fn load(path: &Path) -> Result<Self> {
        tracing::info!("Loading export from: {}", path.display());
        let text = read_export_file(path)?;
        Self::from_json(&text)
    }

    /// Parses export JSON text.
    ///
    /// Elements that are not conversation objects are skipped and recorded.
    ///
    /// # Errors
    /// Returns error if the text is not valid JSON or not an array.
    pub fn from_json(text: &str) -> Result<Self> {
        let values = parse_export(text)?;
        let mut session = Self::default();

        for (index, value) in values.into_iter().enumerate() {
            match parse_conversation(value) {
                Ok(conversation) => session.conversations.push(conversation),
                Err(e) => {
                    tracing::warn!(index, "Skipping conversation: {}", e);
                    session.rejected.push(RejectedEntry {
                        index,
                        reason: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            "Loaded {} conversations ({} rejected)",
            session.conversations.len(),
            session.rejected.len()
        );

        Ok(session)
    }

    /// Accepted conversations in file order.
    #[must_use]
    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    /// Entries rejected at load time.
    #[must_use]
    pub fn rejected(&self) -> &[RejectedEntry] {
        &self.rejected
    }

    /// Whether no conversation was accepted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    /// Finds a conversation by 1-based number or by (partial) id.
    ///
    /// A numeric selector outside `1..=len` is treated as an id fragment.
    ///
    /// # Errors
    /// Returns `InvalidData` if nothing matches.
    pub fn find(&self, selector: &str) -> Result<&Conversation> {
        if let Ok(number) = selector.parse::<usize>() {
            if (1..=self.conversations.len()).contains(&number) {
                return Ok(&self.conversations[number - 1]);
            }
        }

        self.conversations
            .iter()
            .find(|c| c.id.as_deref().is_some_and(|id| id.contains(selector)))
            .ok_or_else(|| {
                AppError::invalid_data(format!(
                    "Conversation '{selector}' not found (numbers range 1-{})",
                    self.conversations.len()
                ))
            })
    }

    /// Computes summary statistics over all conversations.
    #[must_use]
    pub fn stats(&self) -> SessionStats {
        let mut stats = SessionStats {
            conversations: self.conversations.len(),
            rejected: self.rejected.len(),
            ..Default::default()
        };

        for conversation in &self.conversations {
            let messages = extract_messages(conversation);
            if messages.is_empty() {
                stats.empty_conversations += 1;
            }
            for message in &messages {
                stats.messages += 1;
                match message.role.as_str() {
                    "user" => stats.user_messages += 1,
                    "assistant" => stats.assistant_messages += 1,
                    _ => stats.other_messages += 1,
                }
            }
        }

        stats
    }
}
