//! JSON parsing for ChatGPT exports.
//!
//! This is the input boundary: raw JSON is checked once here and each
//! mapping entry is classified as a message node or a scaffold node, so the
//! rest of the pipeline never inspects raw JSON fields.

use serde_json::{Map, Value};

use crate::domain::{AppError, Conversation, Message, Node, Result};

/// Parses the export document into its top-level conversation values.
///
/// # Errors
/// Returns `JsonParse` on malformed JSON and `InvalidStructure` when the
/// top level is not an array.
pub fn parse_export(text: &str) -> Result<Vec<Value>> {
    let value: Value = serde_json::from_str(text).map_err(AppError::json_parse)?;

    match value {
        Value::Array(items) => Ok(items),
        other => {
            tracing::debug!("Top-level JSON is {}, not an array", json_kind(&other));
            Err(AppError::InvalidStructure)
        }
    }
}

/// Validates one conversation value and classifies its mapping.
///
/// Only the conversation itself must be an object. Missing or oddly typed
/// fields degrade to `None`, and a `mapping` that is not an object yields an
/// empty mapping.
///
/// # Errors
/// Returns `InvalidData` if `value` is not a JSON object.
pub fn parse_conversation(value: Value) -> Result<Conversation> {
    let Value::Object(ref obj) = value else {
        return Err(AppError::invalid_data(format!(
            "expected a conversation object, found {}",
            json_kind(&value)
        )));
    };

    let title = obj
        .get("title")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    let create_time = obj.get("create_time").and_then(Value::as_f64);
    let id = obj
        .get("id")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let mapping = obj
        .get("mapping")
        .and_then(Value::as_object)
        .map(|nodes| {
            nodes
                .iter()
                .map(|(key, node)| (key.clone(), classify_node(node)))
                .collect()
        })
        .unwrap_or_default();

    Ok(Conversation {
        title,
        create_time,
        id,
        mapping,
        raw: value,
    })
}

/// Classifies a mapping entry.
///
/// A node is a message node when it has `message.author.role` as a string and
/// `message.content.parts` as an array. Everything else is scaffolding.
pub fn classify_node(node: &Value) -> Node {
    let Some(message) = node.get("message").and_then(Value::as_object) else {
        return Node::Scaffold;
    };

    let Some(parts) = message
        .get("content")
        .and_then(Value::as_object)
        .and_then(|content| content.get("parts"))
        .and_then(Value::as_array)
    else {
        return Node::Scaffold;
    };

    let Some(role) = author_role(message) else {
        tracing::debug!("Message node without author.role, skipping");
        return Node::Scaffold;
    };

    Node::Message(Message {
        role: role.to_string(),
        parts: parts.iter().map(flatten_part).collect(),
        create_time: message.get("create_time").and_then(Value::as_f64),
    })
}

fn author_role(message: &Map<String, Value>) -> Option<&str> {
    message
        .get("author")
        .and_then(|author| author.get("role"))
        .and_then(Value::as_str)
}

/// Renders one content part as text.
///
/// Strings pass through, `null` becomes empty, objects with a string `text`
/// member (multimodal parts) contribute that text, and anything else is
/// written as compact JSON.
pub fn flatten_part(part: &Value) -> String {
    match part {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Object(obj) => match obj.get("text").and_then(Value::as_str) {
            Some(text) => text.to_string(),
            None => part.to_string(),
        },
        other => other.to_string(),
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_export_requires_array() {
        assert!(matches!(
            parse_export(r#"{"title": "x"}"#),
            Err(AppError::InvalidStructure)
        ));
        assert_eq!(parse_export("[]").unwrap().len(), 0);
        assert_eq!(parse_export(r#"[{}, {}]"#).unwrap().len(), 2);
    }

    #[test]
    fn test_parse_export_syntax_error() {
        assert!(matches!(
            parse_export("[{"),
            Err(AppError::JsonParse { .. })
        ));
    }

    #[test]
    fn test_parse_conversation_rejects_non_object() {
        assert!(matches!(
            parse_conversation(json!(42)),
            Err(AppError::InvalidData { .. })
        ));
    }

    #[test]
    fn test_parse_conversation_fields() {
        let conv = parse_conversation(json!({
            "title": "",
            "create_time": 1_700_000_000.25,
            "id": "abc",
            "mapping": "not an object"
        }))
        .unwrap();

        assert_eq!(conv.title, None);
        assert_eq!(conv.create_time, Some(1_700_000_000.25));
        assert_eq!(conv.id.as_deref(), Some("abc"));
        assert!(conv.mapping.is_empty());
    }

    #[test]
    fn test_mapping_keeps_document_order() {
        let conv = parse_conversation(json!({
            "mapping": {
                "zeta": {},
                "alpha": {},
                "mid": {}
            }
        }))
        .unwrap();

        let keys: Vec<&str> = conv.mapping.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_classify_node() {
        assert_eq!(classify_node(&json!({})), Node::Scaffold);
        assert_eq!(classify_node(&json!({ "message": null })), Node::Scaffold);
        assert_eq!(
            classify_node(&json!({
                "message": { "author": { "role": "user" }, "content": { "content_type": "text" } }
            })),
            Node::Scaffold
        );
        assert_eq!(
            classify_node(&json!({
                "message": { "content": { "parts": ["orphan"] } }
            })),
            Node::Scaffold
        );

        let node = classify_node(&json!({
            "message": {
                "author": { "role": "assistant" },
                "content": { "parts": ["a", "b"] },
                "create_time": 12.5
            }
        }));
        assert_eq!(
            node,
            Node::Message(Message {
                role: "assistant".into(),
                parts: vec!["a".into(), "b".into()],
                create_time: Some(12.5),
            })
        );
    }

    #[test]
    fn test_flatten_part() {
        assert_eq!(flatten_part(&json!("hello")), "hello");
        assert_eq!(flatten_part(&json!(null)), "");
        assert_eq!(flatten_part(&json!(3)), "3");
        assert_eq!(
            flatten_part(&json!({ "content_type": "text", "text": "inner" })),
            "inner"
        );
        assert_eq!(
            flatten_part(&json!({ "asset_pointer": "file-1" })),
            r#"{"asset_pointer":"file-1"}"#
        );
    }
}
