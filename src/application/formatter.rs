//! Output formatting for conversations.
//!
//! Produces the plain-text transcript, the JSON export, and the terminal
//! views used by the CLI (inline message list, table, statistics).

use chrono::format::{Item, StrftimeItems};
use chrono::Local;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Table};

use crate::domain::{
    timestamp_to_datetime, AppError, Conversation, ExtractedMessage, Result, SessionStats,
};

use super::extractor::extract_messages;
use super::session::ExportSession;

/// Placeholder for an unknown timestamp.
pub const NOT_AVAILABLE: &str = "N/A";

/// Default strftime pattern for displayed timestamps.
pub const DEFAULT_TIME_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

const NO_MESSAGES_BLOCK: &str = "--- No messages found for this conversation ---";

/// Options for text rendering.
#[derive(Debug, Clone)]
pub struct TextOptions {
    /// chrono strftime pattern used for the `Created:` line.
    pub time_format: String,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            time_format: DEFAULT_TIME_FORMAT.to_string(),
        }
    }
}

/// Formats a conversation as a plain-text transcript.
///
/// Layout: `Title:`, `Created:`, optional `URL:`, a blank line, then one
/// `--- Role ---` block per message. Trailing whitespace is trimmed.
#[must_use]
pub fn format_as_plain_text(conversation: &Conversation, options: &TextOptions) -> String {
    let messages = extract_messages(conversation);

    let mut text = format!("Title: {}\n", conversation.display_title());
    text.push_str(&format!(
        "Created: {}\n",
        format_created(conversation, &options.time_format)
    ));
    if let Some(url) = conversation.share_url() {
        text.push_str(&format!("URL: {url}\n"));
    }
    text.push('\n');

    if messages.is_empty() {
        text.push_str(NO_MESSAGES_BLOCK);
        text.push('\n');
    } else {
        for message in &messages {
            text.push_str(&format!("--- {} ---\n", capitalize_role(&message.role)));
            text.push_str(&message.content);
            text.push_str("\n\n");
        }
    }

    text.trim_end().to_string()
}

/// Formats the conversation creation time in local time, or `N/A`.
#[must_use]
pub fn format_created(conversation: &Conversation, time_format: &str) -> String {
    conversation.created_at().map_or_else(
        || NOT_AVAILABLE.to_string(),
        |dt| dt.with_timezone(&Local).format(time_format).to_string(),
    )
}

/// Formats a message timestamp in local time, if it has one.
#[must_use]
pub fn format_message_time(message: &ExtractedMessage, time_format: &str) -> Option<String> {
    message
        .create_time
        .and_then(timestamp_to_datetime)
        .map(|dt| dt.with_timezone(&Local).format(time_format).to_string())
}

/// Checks that a strftime pattern is usable.
///
/// chrono panics when displaying an invalid pattern, so patterns from
/// configuration are checked up front.
///
/// # Errors
/// Returns `Config` if the pattern contains an invalid specifier.
pub fn validate_time_format(time_format: &str) -> Result<()> {
    if StrftimeItems::new(time_format).any(|item| matches!(item, Item::Error)) {
        return Err(AppError::Config {
            message: format!("Invalid time_format: {time_format}"),
        });
    }
    Ok(())
}

/// Uppercases the first character of a role, leaving the rest unchanged.
#[must_use]
pub fn capitalize_role(role: &str) -> String {
    let mut chars = role.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Re-serializes the source conversation object with 2-space indentation.
///
/// # Errors
/// Returns error if serialization fails.
pub fn format_conversation_json(conversation: &Conversation) -> Result<String> {
    serde_json::to_string_pretty(&conversation.raw).map_err(AppError::serialize)
}

/// Formats extracted messages for terminal display.
#[must_use]
pub fn format_messages_inline(messages: &[ExtractedMessage], time_format: &str) -> String {
    if messages.is_empty() {
        return "No messages found for this conversation.".italic().to_string();
    }

    let mut out = String::new();
    for message in messages {
        let role = format!("{}:", message.role);
        let role = if message.is_user() {
            role.green().bold()
        } else {
            role.blue().bold()
        };
        out.push_str(&role.to_string());
        if let Some(time) = format_message_time(message, time_format) {
            out.push_str(&format!(" {}", time.dimmed()));
        }
        out.push('\n');
        out.push_str(&message.content);
        out.push_str("\n\n");
    }

    out.trim_end().to_string()
}

/// Formats a table listing of the conversations in a session.
#[must_use]
pub fn format_conversations_table(
    session: &ExportSession,
    limit: Option<usize>,
    time_format: &str,
) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["#", "Created", "Msgs", "Title"]);

    let limit = limit.unwrap_or(usize::MAX);
    for (i, conv) in session.conversations().iter().take(limit).enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            format_created(conv, time_format),
            conv.message_node_count().to_string(),
            truncate(conv.display_title(), 50),
        ]);
    }

    table.to_string()
}

/// Formats session statistics for display.
#[must_use]
pub fn format_stats(stats: &SessionStats) -> String {
    format!(
        "{}\n  Conversations: {}\n  Rejected entries: {}\n  Empty conversations: {}\n  Total messages: {}\n  User messages: {}\n  Assistant messages: {}\n  Other messages: {}",
        "📊 Statistics".bold(),
        stats.conversations.to_string().cyan(),
        stats.rejected.to_string().red(),
        stats.empty_conversations.to_string().yellow(),
        stats.messages.to_string().cyan(),
        stats.user_messages.to_string().green(),
        stats.assistant_messages.to_string().blue(),
        stats.other_messages.to_string().yellow()
    )
}

/// Truncates a string to max characters with ellipsis.
fn truncate(s: &str, max_chars: usize) -> String {
    let s = s.lines().next().unwrap_or(s);
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::parser::parse_conversation;
    use serde_json::json;

    fn text(value: serde_json::Value) -> String {
        format_as_plain_text(&parse_conversation(value).unwrap(), &TextOptions::default())
    }

    #[test]
    fn test_empty_conversation_exact_output() {
        let out = text(json!({ "title": "Test", "mapping": {} }));
        assert_eq!(
            out,
            "Title: Test\nCreated: N/A\n\n--- No messages found for this conversation ---"
        );
    }

    #[test]
    fn test_untitled_and_url() {
        let out = text(json!({ "id": "c-1", "mapping": {} }));
        assert!(out.starts_with("Title: Untitled Conversation\nCreated: N/A\n"));
        assert!(out.contains("\nURL: https://chat.openai.com/c/c-1\n\n"));
    }

    #[test]
    fn test_created_line_has_a_date() {
        let out = text(json!({ "title": "T", "create_time": 1_700_000_000.0, "mapping": {} }));
        let created = out.lines().nth(1).unwrap();
        assert!(created.starts_with("Created: "));
        assert_ne!(created, "Created: N/A");
        assert!(created.len() > "Created: ".len());
    }

    #[test]
    fn test_message_blocks() {
        let out = text(json!({
            "title": "Chat",
            "mapping": {
                "b": {
                    "message": {
                        "author": { "role": "assistant" },
                        "content": { "parts": ["Hello!", "How can I help?"] },
                        "create_time": 2
                    }
                },
                "a": {
                    "message": {
                        "author": { "role": "user" },
                        "content": { "parts": ["Hi"] },
                        "create_time": 1
                    }
                }
            }
        }));

        assert_eq!(
            out,
            "Title: Chat\nCreated: N/A\n\n--- User ---\nHi\n\n--- Assistant ---\nHello!\nHow can I help?"
        );
    }

    #[test]
    fn test_trailing_whitespace_trimmed() {
        let out = text(json!({
            "title": "T",
            "mapping": {
                "a": {
                    "message": {
                        "author": { "role": "user" },
                        "content": { "parts": ["ends with space   \n\n"] }
                    }
                }
            }
        }));

        assert!(out.starts_with("Title: "));
        assert!(out.ends_with("--- User ---\nends with space"));
    }

    #[test]
    fn test_capitalize_role() {
        assert_eq!(capitalize_role("user"), "User");
        assert_eq!(capitalize_role("assistant"), "Assistant");
        assert_eq!(capitalize_role("tOOL"), "TOOL");
        assert_eq!(capitalize_role("System"), "System");
        assert_eq!(capitalize_role(""), "");
    }

    #[test]
    fn test_json_export_round_trip() {
        let source = json!({
            "title": "Round trip",
            "create_time": 1_700_000_000.123,
            "mapping": { "x": { "id": "x", "message": null, "children": [] } },
            "extra": { "kept": [1, 2, 3] }
        });
        let conv = parse_conversation(source.clone()).unwrap();

        let out = format_conversation_json(&conv).unwrap();

        assert!(out.contains("\n  \"title\": \"Round trip\""));
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, source);
    }

    #[test]
    fn test_default_time_format_is_unpadded() {
        let dt = chrono::NaiveDate::from_ymd_opt(2024, 1, 5)
            .and_then(|d| d.and_hms_opt(3, 4, 5))
            .unwrap();
        assert_eq!(
            dt.format(DEFAULT_TIME_FORMAT).to_string(),
            "1/5/2024, 3:04:05 AM"
        );

        let afternoon = chrono::NaiveDate::from_ymd_opt(2024, 12, 25)
            .and_then(|d| d.and_hms_opt(15, 30, 0))
            .unwrap();
        assert_eq!(
            afternoon.format(DEFAULT_TIME_FORMAT).to_string(),
            "12/25/2024, 3:30:00 PM"
        );
    }

    #[test]
    fn test_validate_time_format() {
        assert!(validate_time_format(DEFAULT_TIME_FORMAT).is_ok());
        assert!(validate_time_format("%Y-%m-%d %H:%M").is_ok());
        assert!(validate_time_format("%Q").is_err());
    }

    #[test]
    fn test_inline_empty_notice() {
        let out = format_messages_inline(&[], DEFAULT_TIME_FORMAT);
        assert!(out.contains("No messages found for this conversation."));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world!", 8), "hello...");
        assert_eq!(truncate("line one\nline two", 20), "line one");
    }
}
