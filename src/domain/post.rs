use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::sanitizer::visible_text;

/// A single post as delivered by the upstream listing endpoint.
///
/// The record is kept open-ended: every field the server sends is carried
/// through to the export untouched, except `content`, which holds plain text
/// once [`Post::sanitize_content`] has run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Post(Map<String, Value>);

impl Post {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Identifier used as the pagination cursor.
    ///
    /// Mastodon serializes ids as strings, but integer ids are accepted too.
    /// Missing, null and empty ids yield `None`.
    pub fn id(&self) -> Option<String> {
        match self.0.get("id")? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn content(&self) -> Option<&str> {
        self.0.get("content").and_then(Value::as_str)
    }

    /// Replace the markup in `content` with its visible text.
    ///
    /// A missing or non-string `content` becomes an empty string.
    pub fn sanitize_content(&mut self) {
        let text = visible_text(self.content());
        self.0.insert("content".to_string(), Value::String(text));
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}
