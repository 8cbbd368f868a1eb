//! Export planning.
//!
//! Turns conversations into named file contents. Writing them out is left
//! to the infrastructure layer.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::domain::{AppError, Conversation, ExportFormat, Result};

use super::filename::{conversation_filename, flat_filename, with_suffix};
use super::formatter::{format_as_plain_text, format_conversation_json, TextOptions};
use super::session::ExportSession;

/// One file to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportEntry {
    /// File name (archive entry name for batches).
    pub filename: String,
    /// File contents.
    pub contents: String,
}

/// Path for writing a single export entry into `dir`.
///
/// The entry name is flattened so it never creates subdirectories.
#[must_use]
pub fn single_file_path(dir: &Path, entry: &ExportEntry) -> PathBuf {
    dir.join(flat_filename(&entry.filename))
}

/// A conversation left out of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedConversation {
    /// Title of the conversation.
    pub title: String,
    /// Why it was skipped.
    pub reason: String,
}

/// Result of rendering a whole session.
#[derive(Debug, Clone, Default)]
pub struct BatchExport {
    /// Rendered files, in session order.
    pub entries: Vec<ExportEntry>,
    /// Conversations that failed to render.
    pub skipped: Vec<SkippedConversation>,
}

/// Renders a conversation in the given format.
///
/// # Errors
/// Returns error if JSON serialization fails.
pub fn render_conversation(
    conversation: &Conversation,
    format: ExportFormat,
    options: &TextOptions,
) -> Result<String> {
    match format {
        ExportFormat::Json => format_conversation_json(conversation),
        ExportFormat::Text => Ok(format_as_plain_text(conversation, options)),
    }
}

/// Renders a single conversation with its conventional file name.
///
/// # Errors
/// Returns error if rendering fails.
pub fn export_conversation(
    conversation: &Conversation,
    format: ExportFormat,
    options: &TextOptions,
) -> Result<ExportEntry> {
    Ok(ExportEntry {
        filename: conversation_filename(conversation, format),
        contents: render_conversation(conversation, format, options)?,
    })
}

/// Renders every conversation of a session.
///
/// Each conversation is handled on its own; a failure is logged and recorded
/// in `skipped` without stopping the batch. Entries rejected when the session
/// was loaded are reported in `skipped` as well. Colliding file names get a
/// numeric suffix so no entry overwrites another.
///
/// # Errors
/// Returns `InvalidData` if no conversation could be rendered.
pub fn export_batch(
    session: &ExportSession,
    format: ExportFormat,
    options: &TextOptions,
) -> Result<BatchExport> {
    let mut batch = BatchExport::default();
    let mut used_names = HashSet::new();

    for rejected in session.rejected() {
        batch.skipped.push(SkippedConversation {
            title: format!("entry {}", rejected.index),
            reason: rejected.reason.clone(),
        });
    }

    for conversation in session.conversations() {
        match export_conversation(conversation, format, options) {
            Ok(mut entry) => {
                entry.filename = unique_name(&entry.filename, &mut used_names);
                tracing::debug!("Rendered {}", entry.filename);
                batch.entries.push(entry);
            }
            Err(e) => {
                tracing::warn!(
                    "Error processing conversation {}: {}",
                    conversation.display_title(),
                    e
                );
                batch.skipped.push(SkippedConversation {
                    title: conversation.display_title().to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }

    if batch.entries.is_empty() {
        return Err(AppError::invalid_data(match format {
            ExportFormat::Json => "No valid conversations found to zip.",
            ExportFormat::Text => "No valid conversations found to zip as text.",
        }));
    }

    Ok(batch)
}

fn unique_name(filename: &str, used: &mut HashSet<String>) -> String {
    let mut candidate = filename.to_string();
    let mut n = 1;
    while used.contains(&candidate) {
        n += 1;
        candidate = with_suffix(filename, n);
    }
    used.insert(candidate.clone());
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::write_single_file;
    use std::fs;
    use tempfile::tempdir;

    const EXPORT: &str = r#"[
        {
            "title": "Same",
            "create_time": 1700000000,
            "id": "one",
            "mapping": {
                "a": {
                    "message": {
                        "author": { "role": "user" },
                        "content": { "parts": ["question"] },
                        "create_time": 1700000001
                    }
                }
            }
        },
        { "title": "Same", "create_time": 1700000000, "mapping": {} },
        { "title": "Other", "mapping": {} }
    ]"#;

    #[test]
    fn test_export_batch_text() {
        let session = ExportSession::from_json(EXPORT).unwrap();

        let batch = export_batch(&session, ExportFormat::Text, &TextOptions::default()).unwrap();

        let names: Vec<&str> = batch.entries.iter().map(|e| e.filename.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Same_chatgpt_2023-11-14.txt",
                "Same_chatgpt_2023-11-14_2.txt",
                "Other_chatgpt_N/A.txt",
            ]
        );
        assert!(batch.skipped.is_empty());
        assert!(batch.entries[0]
            .contents
            .ends_with("URL: https://chat.openai.com/c/one\n\n--- User ---\nquestion"));
    }

    #[test]
    fn test_export_batch_json_is_source_object() {
        let session = ExportSession::from_json(EXPORT).unwrap();

        let batch = export_batch(&session, ExportFormat::Json, &TextOptions::default()).unwrap();

        assert_eq!(batch.entries.len(), 3);
        let parsed: serde_json::Value = serde_json::from_str(&batch.entries[2].contents).unwrap();
        assert_eq!(parsed, serde_json::json!({ "title": "Other", "mapping": {} }));
    }

    #[test]
    fn test_export_batch_mixed_keeps_good_entries() {
        let session = ExportSession::from_json(
            r#"[{ "title": "Good", "mapping": {} }, 42, { "title": "Also good" }]"#,
        )
        .unwrap();

        let batch = export_batch(&session, ExportFormat::Json, &TextOptions::default()).unwrap();

        let names: Vec<&str> = batch.entries.iter().map(|e| e.filename.as_str()).collect();
        assert_eq!(
            names,
            vec!["Good_chatgpt_N/A.json", "Also_good_chatgpt_N/A.json"]
        );
        assert_eq!(batch.skipped.len(), 1);
        assert_eq!(batch.skipped[0].title, "entry 1");
        assert!(batch.skipped[0]
            .reason
            .contains("expected a conversation object"));
    }

    #[test]
    fn test_single_export_without_date_is_flat_file() {
        let dir = tempdir().unwrap();
        let session = ExportSession::from_json(r#"[{ "mapping": {} }]"#).unwrap();
        let entry = export_conversation(
            &session.conversations()[0],
            ExportFormat::Text,
            &TextOptions::default(),
        )
        .unwrap();

        let path = single_file_path(dir.path(), &entry);
        write_single_file(&path, &entry.contents).unwrap();

        let written: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        assert_eq!(written.len(), 1);
        assert!(written[0].is_file());
        assert_eq!(
            written[0].file_name().unwrap(),
            "Untitled_Conversation_chatgpt_N-A.txt"
        );
    }

    #[test]
    fn test_export_batch_empty_session() {
        let session = ExportSession::from_json("[1, 2]").unwrap();

        let err = export_batch(&session, ExportFormat::Text, &TextOptions::default()).unwrap_err();
        assert!(err.to_string().contains("No valid conversations found"));
    }

    #[test]
    fn test_unique_name() {
        let mut used = HashSet::new();
        assert_eq!(unique_name("a.txt", &mut used), "a.txt");
        assert_eq!(unique_name("a.txt", &mut used), "a_2.txt");
        assert_eq!(unique_name("a.txt", &mut used), "a_3.txt");
        assert_eq!(unique_name("b.txt", &mut used), "b.txt");
    }
}
