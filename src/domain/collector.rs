use crate::domain::Post;

/// Ordered accumulator for one fetch operation.
///
/// Append-only. The buffer may grow past `target` because whole pages are
/// appended; truncation happens once, at export.
#[derive(Debug, Clone)]
pub struct Collector {
    posts: Vec<Post>,
    target: usize,
}

impl Collector {
    pub fn new(target: usize) -> Self {
        Self {
            posts: Vec::new(),
            target,
        }
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// True once at least `target` posts have been collected.
    pub fn is_satisfied(&self) -> bool {
        self.posts.len() >= self.target
    }

    /// Append a batch and return the cursor for the next older page.
    ///
    /// The cursor is the id of the batch's last post; `None` if the batch is
    /// empty or its last post carries no usable id.
    pub fn ingest(&mut self, batch: Vec<Post>) -> Option<String> {
        let cursor = batch.last().and_then(Post::id);
        self.posts.extend(batch);
        cursor
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn into_posts(self) -> Vec<Post> {
        self.posts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn batch(ids: std::ops::Range<u32>) -> Vec<Post> {
        ids.map(|i| serde_json::from_value(json!({"id": i.to_string()})).unwrap())
            .collect()
    }

    #[test]
    fn test_ingest_returns_last_id() {
        let mut collector = Collector::new(10);
        assert_eq!(collector.ingest(batch(0..3)), Some("2".into()));
        assert_eq!(collector.len(), 3);
        assert!(!collector.is_satisfied());
    }

    #[test]
    fn test_may_exceed_target() {
        let mut collector = Collector::new(5);
        collector.ingest(batch(0..4));
        collector.ingest(batch(4..8));
        assert_eq!(collector.len(), 8);
        assert!(collector.is_satisfied());
    }

    #[test]
    fn test_no_cursor_without_id() {
        let mut collector = Collector::new(5);
        let posts = vec![serde_json::from_value(json!({"content": "x"})).unwrap()];
        assert_eq!(collector.ingest(posts), None);
        assert_eq!(collector.ingest(Vec::new()), None);
        assert_eq!(collector.len(), 1);
    }
}
