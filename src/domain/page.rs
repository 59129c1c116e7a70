use serde_json::{Map, Value};

use crate::domain::Post;

/// Outcome of reading one page of the listing endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome {
    /// A non-empty page; content already sanitized.
    Records(Vec<Post>),
    /// The server returned `[]`: the feed is exhausted.
    Empty,
    /// Non-success status, transport error or a body that is not an array of objects.
    Failed(String),
}

impl PageOutcome {
    /// Classify a response body that arrived with a success status.
    ///
    /// The whole page is rejected if any element is not a JSON object, so a
    /// malformed page never contributes a partial batch.
    pub fn from_body(body: &[u8]) -> Self {
        let records: Vec<Map<String, Value>> = match serde_json::from_slice(body) {
            Ok(records) => records,
            Err(e) => return Self::Failed(format!("unexpected listing body: {}", e)),
        };

        if records.is_empty() {
            return Self::Empty;
        }

        let posts = records
            .into_iter()
            .map(|fields| {
                let mut post = Post::new(fields);
                post.sanitize_content();
                post
            })
            .collect();

        Self::Records(posts)
    }

    /// Classify a response by status code and body.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        if !(200..300).contains(&status) {
            return Self::Failed(format!("HTTP {}", status));
        }
        Self::from_body(body)
    }
}
