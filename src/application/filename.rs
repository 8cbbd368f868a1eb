//! Export file naming.
//!
//! Exported files are named `<title>_chatgpt_<date>.<ext>`.

use chrono::NaiveDate;

use crate::domain::{Conversation, ExportFormat};

use super::formatter::NOT_AVAILABLE;

/// Maximum length of a sanitized title, in characters.
pub const MAX_FILENAME_CHARS: usize = 100;

const FORBIDDEN_CHARS: &[char] = &['/', '\\', '?', '%', '*', ':', '|', '"', '<', '>'];

/// Makes a title safe for use as a file name.
///
/// Forbidden characters become `-`, each run of whitespace becomes a single
/// `_`, and the result is cut to [`MAX_FILENAME_CHARS`] characters.
#[must_use]
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_whitespace = false;

    for c in name.chars() {
        if is_separator_space(c) {
            if !in_whitespace {
                out.push('_');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        out.push(if FORBIDDEN_CHARS.contains(&c) { '-' } else { c });
    }

    out.chars().take(MAX_FILENAME_CHARS).collect()
}

/// Whitespace for file naming: Unicode `White_Space` plus U+FEFF, minus U+0085.
fn is_separator_space(c: char) -> bool {
    match c {
        '\u{FEFF}' => true,
        '\u{0085}' => false,
        _ => c.is_whitespace(),
    }
}

/// File name for a single exported conversation.
///
/// The date is the UTC calendar date of `create_time`, or `N/A`.
#[must_use]
pub fn conversation_filename(conversation: &Conversation, format: ExportFormat) -> String {
    let date = conversation.created_at().map_or_else(
        || NOT_AVAILABLE.to_string(),
        |dt| dt.format("%Y-%m-%d").to_string(),
    );

    format!(
        "{}_chatgpt_{}.{}",
        sanitize_filename(conversation.display_title()),
        date,
        format.extension()
    )
}

/// File name for a batch archive created on `date`.
#[must_use]
pub fn archive_filename(format: ExportFormat, date: NaiveDate) -> String {
    let date = date.format("%Y-%m-%d");
    match format {
        ExportFormat::Json => format!("all_chatgpt_conversations_{date}.zip"),
        ExportFormat::Text => format!("all_chatgpt_conversations_text_{date}.zip"),
    }
}

/// Makes an export file name usable as a single path component.
///
/// Archive entries keep the literal `N/A` date; on disk the separator would
/// create a directory, so path separators become `-`.
#[must_use]
pub fn flat_filename(filename: &str) -> String {
    filename.replace(['/', '\\'], "-")
}

/// Appends `_<n>` before the extension of `filename`.
#[must_use]
pub fn with_suffix(filename: &str, n: usize) -> String {
    match filename.rsplit_once('.') {
        Some((stem, ext)) => format!("{stem}_{n}.{ext}"),
        None => format!("{filename}_{n}"),
    }
}
