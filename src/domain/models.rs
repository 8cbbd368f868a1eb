//! Domain models for ChatGPT conversation exports.
//!
//! The export is a tree of nodes per conversation. These types are the
//! validated view of that tree; the original JSON is kept alongside so a
//! conversation can be re-serialized without loss.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

/// Title used when a conversation has no (or an empty) title.
pub const UNTITLED: &str = "Untitled Conversation";

/// Base of the share URL synthesized from a conversation id.
pub const CONVERSATION_URL_BASE: &str = "https://chat.openai.com/c/";

/// A single turn carried by a mapping node.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// Speaker role (`user`, `assistant`, `system`, `tool`, ...).
    pub role: String,
    /// Content parts in document order, already flattened to text.
    pub parts: Vec<String>,
    /// Per-message Unix timestamp in seconds.
    pub create_time: Option<f64>,
}

/// One entry of a conversation mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Node carrying an actual message turn.
    Message(Message),
    /// Root or structural node without a usable message.
    Scaffold,
}

impl Node {
    /// Returns the message if this is a message node.
    #[must_use]
    pub const fn message(&self) -> Option<&Message> {
        match self {
            Self::Message(message) => Some(message),
            Self::Scaffold => None,
        }
    }
}

/// A conversation as found in the export file.
#[derive(Debug, Clone)]
pub struct Conversation {
    /// Display title, `None` when absent or empty.
    pub title: Option<String>,
    /// Creation time as Unix seconds.
    pub create_time: Option<f64>,
    /// Conversation id, used for the share URL.
    pub id: Option<String>,
    /// Mapping entries in source document order.
    pub mapping: Vec<(String, Node)>,
    /// The untouched source object.
    pub raw: Value,
}

impl Conversation {
    /// Title to show, falling back to [`UNTITLED`].
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(UNTITLED)
    }

    /// Creation time as a UTC datetime.
    ///
    /// A zero timestamp counts as unknown, matching how the exporter writes
    /// placeholder values.
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.create_time
            .filter(|secs| *secs != 0.0)
            .and_then(timestamp_to_datetime)
    }

    /// Share URL for this conversation, if it has an id.
    #[must_use]
    pub fn share_url(&self) -> Option<String> {
        self.id
            .as_deref()
            .map(|id| format!("{CONVERSATION_URL_BASE}{id}"))
    }

    /// Number of message nodes in the mapping.
    #[must_use]
    pub fn message_node_count(&self) -> usize {
        self.mapping
            .iter()
            .filter(|(_, node)| node.message().is_some())
            .count()
    }
}

/// Converts Unix seconds (possibly fractional) to a UTC datetime.
///
/// Sub-millisecond precision is truncated.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn timestamp_to_datetime(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis((secs * 1000.0) as i64)
}

/// A message recovered from the mapping, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedMessage {
    /// Copied from `author.role`.
    pub role: String,
    /// Content parts joined with `\n`.
    pub content: String,
    /// Sort key, Unix seconds.
    pub create_time: Option<f64>,
    /// Source node id.
    pub id: String,
}

impl ExtractedMessage {
    /// Whether this message was written by the user.
    #[must_use]
    pub fn is_user(&self) -> bool {
        self.role == "user"
    }
}

/// Output format for exported conversations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// The source conversation object, pretty-printed.
    Json,
    /// Human-readable transcript.
    #[default]
    #[serde(alias = "txt")]
    Text,
}

impl ExportFormat {
    /// File extension for this format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "txt",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" | "txt" => Ok(Self::Text),
            _ => Err(format!("Unknown format: {s}. Use: json, text")),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Text => write!(f, "text"),
        }
    }
}

/// Summary statistics for a loaded export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Conversations accepted at the input boundary.
    pub conversations: usize,
    /// Array elements rejected at the input boundary.
    pub rejected: usize,
    /// Total extracted messages.
    pub messages: usize,
    /// Messages with role `user`.
    pub user_messages: usize,
    /// Messages with role `assistant`.
    pub assistant_messages: usize,
    /// Messages with any other role.
    pub other_messages: usize,
    /// Conversations without any extracted message.
    pub empty_conversations: usize,
}
