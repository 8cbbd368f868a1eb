//! Message extraction.
//!
//! Flattens a conversation's node mapping into a chronologically ordered
//! list of messages.

use std::cmp::Ordering;

use crate::domain::{Conversation, ExtractedMessage};

/// Extracts every message node of `conversation`, sorted by `create_time`.
///
/// Messages without a timestamp sort before timestamped ones. The sort is
/// stable, so equal keys keep their mapping order and repeated calls on the
/// same conversation give identical output.
#[must_use]
pub fn extract_messages(conversation: &Conversation) -> Vec<ExtractedMessage> {
    let mut messages: Vec<ExtractedMessage> = conversation
        .mapping
        .iter()
        .filter_map(|(node_id, node)| {
            node.message().map(|message| ExtractedMessage {
                role: message.role.clone(),
                content: message.parts.join("\n"),
                create_time: message.create_time,
                id: node_id.clone(),
            })
        })
        .collect();

    messages.sort_by(|a, b| compare_create_time(a.create_time, b.create_time));

    tracing::trace!(
        nodes = conversation.mapping.len(),
        messages = messages.len(),
        "Extracted messages"
    );

    messages
}

/// Total order on optional timestamps: missing first, then ascending.
fn compare_create_time(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
